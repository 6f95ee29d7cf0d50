//! SVG chart rendering: price with SMA/EMA above an RSI panel.

use crate::domain::analysis::SymbolAnalysis;
use crate::domain::error::PricelensError;
use crate::domain::indicator::{IndicatorRow, IndicatorType};
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::PathBuf;

const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 800.0;
const PADDING: f64 = 50.0;
const TITLE_SPACE: f64 = 30.0;
const PANEL_GAP: f64 = 40.0;

const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;

/// Vertical extent of one panel, in SVG user units.
#[derive(Debug, Clone, Copy)]
struct Panel {
    top: f64,
    height: f64,
    min: f64,
    max: f64,
}

impl Panel {
    fn y(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        let frac = if range > 0.0 {
            (value - self.min) / range
        } else {
            0.5
        };
        self.top + self.height - frac * self.height
    }
}

fn x_at(index: usize, count: usize) -> f64 {
    let plot_width = WIDTH - 2.0 * PADDING;
    if count > 1 {
        PADDING + index as f64 * plot_width / (count - 1) as f64
    } else {
        PADDING + plot_width / 2.0
    }
}

/// One `<polyline>` per unbroken run of defined values.
fn polylines(values: &[Option<f64>], panel: &Panel, style: &str) -> String {
    let mut out = String::new();
    let mut run: Vec<String> = Vec::new();

    let flush = |run: &mut Vec<String>, out: &mut String| {
        if !run.is_empty() {
            out.push_str(&format!(
                "  <polyline fill=\"none\" {} points=\"{}\"/>\n",
                style,
                run.join(" ")
            ));
            run.clear();
        }
    };

    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) => run.push(format!("{:.1},{:.1}", x_at(i, values.len()), panel.y(*v))),
            None => flush(&mut run, &mut out),
        }
    }
    flush(&mut run, &mut out);
    out
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn frame(panel: &Panel) -> String {
    format!(
        "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"none\" stroke=\"#cccccc\"/>\n",
        PADDING,
        panel.top,
        WIDTH - 2.0 * PADDING,
        panel.height
    )
}

fn legend(entries: &[(&str, &str)], top: f64) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, (label, color))| {
            format!(
                "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" fill=\"{}\">{}</text>\n",
                PADDING + 10.0 + i as f64 * 110.0,
                top + 16.0,
                color,
                escape_xml(label)
            )
        })
        .collect()
}

/// Render the two-panel chart for one symbol. Returns `None` for an empty series.
pub fn render_chart(symbol: &str, rows: &[IndicatorRow]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }

    let closes: Vec<Option<f64>> = rows.iter().map(|r| Some(r.close)).collect();
    let sma: Vec<Option<f64>> = rows.iter().map(|r| r.sma_20).collect();
    let ema: Vec<Option<f64>> = rows.iter().map(|r| r.ema_20).collect();
    let rsi: Vec<Option<f64>> = rows.iter().map(|r| r.rsi_14).collect();

    let (min, max) = closes
        .iter()
        .chain(&sma)
        .chain(&ema)
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let plot_height = HEIGHT - 2.0 * PADDING - TITLE_SPACE - PANEL_GAP;
    let price = Panel {
        top: PADDING + TITLE_SPACE,
        height: plot_height * 0.75,
        min,
        max,
    };
    let oscillator = Panel {
        top: price.top + price.height + PANEL_GAP,
        height: plot_height * 0.25,
        min: 0.0,
        max: 100.0,
    };

    let [sma_kind, ema_kind, rsi_kind, _] = IndicatorType::standard_set();
    let sma_label = sma_kind.to_string();
    let ema_label = ema_kind.to_string();
    let rsi_label = rsi_kind.to_string();

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\" viewBox=\"0 0 {:.0} {:.0}\">\n",
        WIDTH, HEIGHT, WIDTH, HEIGHT
    ));
    svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"18\" text-anchor=\"middle\">{} Price with SMA/EMA</text>\n",
        WIDTH / 2.0,
        PADDING,
        escape_xml(symbol)
    ));

    svg.push_str(&frame(&price));
    svg.push_str(&polylines(&closes, &price, "stroke=\"black\" stroke-width=\"1.2\""));
    svg.push_str(&polylines(
        &sma,
        &price,
        "stroke=\"#1f77b4\" stroke-width=\"1\" stroke-dasharray=\"6,4\"",
    ));
    svg.push_str(&polylines(
        &ema,
        &price,
        "stroke=\"#ff7f0e\" stroke-width=\"1\" stroke-dasharray=\"2,3\"",
    ));
    svg.push_str(&legend(
        &[("Close", "black"), (sma_label.as_str(), "#1f77b4"), (ema_label.as_str(), "#ff7f0e")],
        price.top,
    ));

    svg.push_str(&frame(&oscillator));
    for (level, color) in [(RSI_OVERBOUGHT, "red"), (RSI_OVERSOLD, "green")] {
        let y = oscillator.y(level);
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"0.7\" stroke-dasharray=\"5,4\"/>\n",
            PADDING,
            y,
            WIDTH - PADDING,
            y,
            color
        ));
    }
    svg.push_str(&polylines(&rsi, &oscillator, "stroke=\"purple\" stroke-width=\"1\""));
    svg.push_str(&legend(&[(rsi_label.as_str(), "purple")], oscillator.top));

    let axis_y = oscillator.top + oscillator.height + 20.0;
    let first = rows[0].date;
    let last = rows[rows.len() - 1].date;
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\">{}</text>\n",
        PADDING, axis_y, first
    ));
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"end\">{}</text>\n",
        WIDTH - PADDING,
        axis_y,
        last
    ));
    svg.push_str("</svg>\n");

    Some(svg)
}

/// Writes `<symbol>_indicators.svg` files into one directory.
pub struct SvgChartAdapter {
    out_dir: PathBuf,
}

impl SvgChartAdapter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn chart_path(&self, symbol: &str) -> PathBuf {
        self.out_dir.join(format!("{}_indicators.svg", symbol))
    }
}

impl ReportPort for SvgChartAdapter {
    fn write_chart(&self, analysis: &SymbolAnalysis) -> Result<Option<PathBuf>, PricelensError> {
        let Some(svg) = render_chart(analysis.symbol(), &analysis.rows) else {
            return Ok(None);
        };

        fs::create_dir_all(&self.out_dir).map_err(|e| PricelensError::Render {
            reason: format!("failed to create {}: {}", self.out_dir.display(), e),
        })?;
        let path = self.chart_path(analysis.symbol());
        fs::write(&path, svg).map_err(|e| PricelensError::Render {
            reason: format!("failed to write {}: {}", path.display(), e),
        })?;

        tracing::debug!(symbol = %analysis.symbol(), path = %path.display(), "chart written");
        Ok(Some(path))
    }
}
