use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Value};

use super::{Chart, ChartVariant};
use crate::color::{BASIC_MARKER_HEX, VIRIDIS_NAME};
use crate::data::category::shape_legend;
use crate::data::stats::SCALE_MAX;

/// plotly.js build loaded by the exported page.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

// ---------------------------------------------------------------------------
// Plotly figure
// ---------------------------------------------------------------------------

/// The single scatter trace.
fn trace(chart: &Chart) -> Value {
    let x: Vec<f64> = chart.points.iter().map(|p| p.scaled_mean).collect();
    let y: Vec<&str> = chart.points.iter().map(|p| p.name.as_str()).collect();

    let mut trace = json!({
        "type": "scatter",
        "x": x,
        "y": y,
        "mode": "markers",
        "showlegend": false,
    });

    match chart.variant {
        ChartVariant::Basic => {
            trace["marker"] = json!({
                "symbol": "circle",
                "size": 12,
                "color": BASIC_MARKER_HEX,
            });
            trace["hovertemplate"] = json!("factor=%{y}<br>mean (0–5)=%{x:.2f}<extra></extra>");
        }
        ChartVariant::Gradient => {
            trace["marker"] = gradient_marker(&x, json!("circle"), json!(14));
            trace["customdata"] = json!(chart.points.iter().map(|p| p.raw_mean).collect::<Vec<_>>());
            trace["hovertemplate"] = json!(
                "<b>%{y}</b><br>Scaled Mean: %{x:.2f}/5<br>Raw Mean: %{customdata:.2f}<extra></extra>"
            );
        }
        ChartVariant::Categorized => {
            let symbols: Vec<&str> = chart.points.iter().map(|p| p.shape.plotly_symbol()).collect();
            let sizes: Vec<f64> = chart.points.iter().map(|p| p.size).collect();
            let custom: Vec<[f64; 2]> = chart
                .points
                .iter()
                .map(|p| [p.raw_mean, p.correlation])
                .collect();
            trace["marker"] = gradient_marker(&x, json!(symbols), json!(sizes));
            trace["customdata"] = json!(custom);
            trace["hovertemplate"] = json!(concat!(
                "<b>%{y}</b><br>",
                "Scaled Mean: %{x:.2f}/5<br>",
                "Raw Mean: %{customdata[0]:.2f}<br>",
                "Correlation to Stress Level: %{customdata[1]:.2f}",
                "<extra></extra>"
            ));
        }
    }
    trace
}

fn gradient_marker(color: &[f64], symbol: Value, size: Value) -> Value {
    json!({
        "symbol": symbol,
        "size": size,
        "color": color,
        "colorscale": VIRIDIS_NAME,
        "showscale": true,
        "colorbar": { "title": { "text": "Mean (0–5)" } },
    })
}

fn layout(chart: &Chart) -> Value {
    let interactive = chart.variant != ChartVariant::Basic;

    let mut xaxis = json!({
        "title": { "text": chart.variant.x_title() },
        "range": [0.0, SCALE_MAX],
        "dtick": 0.5,
        "showgrid": true,
        "zeroline": true,
        "ticks": "outside",
        "linecolor": "black",
        "linewidth": 1,
        "mirror": true,
    });
    if interactive {
        xaxis["rangeslider"] = json!({ "visible": true });
    }

    let margin = if interactive {
        json!({ "l": 120, "r": 60, "t": 80, "b": 70 })
    } else {
        json!({ "l": 110, "r": 40, "t": 70, "b": 60 })
    };

    let mut layout = json!({
        "title": { "text": chart.variant.title() },
        "xaxis": xaxis,
        "yaxis": {
            "title": { "text": "Factor" },
            "showgrid": true,
            "zeroline": !interactive,
            "ticks": "outside",
            "linecolor": "black",
            "linewidth": 1,
            "mirror": true,
            "automargin": true,
        },
        "paper_bgcolor": "white",
        "plot_bgcolor": "white",
        "width": chart.variant.width(),
        "height": chart.height(),
        "margin": margin,
    });

    if chart.variant == ChartVariant::Categorized {
        layout["annotations"] = json!([{
            "text": format!("Shapes — {}", shape_legend()),
            "x": 0,
            "y": 1.08,
            "xref": "paper",
            "yref": "paper",
            "showarrow": false,
            "xanchor": "left",
            "font": { "size": 12 },
            "xshift": 100,
            "yshift": -11,
        }]);
    }
    layout
}

/// The chart as a Plotly figure: `{ "data": [...], "layout": {...} }`.
pub fn figure(chart: &Chart) -> Value {
    json!({
        "data": [trace(chart)],
        "layout": layout(chart),
    })
}

// ---------------------------------------------------------------------------
// HTML page
// ---------------------------------------------------------------------------

/// Standalone HTML page drawing the chart with plotly.js from the CDN.
pub fn render_html(chart: &Chart) -> Result<String> {
    let fig = figure(chart);
    // Keep a "</script>" inside a string from closing the tag early.
    let data = serde_json::to_string(&fig["data"])
        .context("serializing chart data")?
        .replace("</", "<\\/");
    let layout = serde_json::to_string(&fig["layout"])
        .context("serializing chart layout")?
        .replace("</", "<\\/");

    Ok(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <script src="{cdn}" charset="utf-8"></script>
</head>
<body>
    <div id="chart"></div>
    <script>
        Plotly.newPlot("chart", {data}, {layout}, {{"responsive": true}});
    </script>
</body>
</html>
"##,
        title = chart.variant.title(),
        cdn = PLOTLY_CDN,
    ))
}

/// Write the page to `path`, replacing any existing file.
pub fn write_html(chart: &Chart, path: &Path) -> Result<()> {
    let page = render_html(chart)?;
    std::fs::write(path, page).with_context(|| format!("writing {}", path.display()))?;
    log::info!(
        "Wrote {} ({} factors, {:?} layout)",
        path.display(),
        chart.points.len(),
        chart.variant
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartPoint;
    use crate::data::category::{Category, MarkerShape};

    fn chart(variant: ChartVariant) -> Chart {
        Chart {
            variant,
            points: vec![
                ChartPoint {
                    name: "study_load".into(),
                    scaled_mean: 2.5,
                    raw_mean: 15.0,
                    correlation: 0.5,
                    category: Category::School,
                    shape: MarkerShape::Square,
                    size: 50.0,
                },
                ChartPoint {
                    name: "stress_level".into(),
                    scaled_mean: 2.5,
                    raw_mean: 1.0,
                    correlation: 0.0,
                    category: Category::Health,
                    shape: MarkerShape::TriangleUp,
                    size: 50.0,
                },
            ],
        }
    }

    #[test]
    fn categorized_trace_carries_shapes_sizes_and_custom_data() {
        let fig = figure(&chart(ChartVariant::Categorized));
        let marker = &fig["data"][0]["marker"];
        assert_eq!(marker["symbol"], json!(["square", "triangle-up"]));
        assert_eq!(marker["size"], json!([50.0, 50.0]));
        assert_eq!(marker["colorscale"], "Viridis");
        assert_eq!(fig["data"][0]["customdata"], json!([[15.0, 0.5], [1.0, 0.0]]));
        assert!(fig["layout"]["annotations"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Health: ▲"));
    }

    #[test]
    fn basic_trace_is_plain_green() {
        let fig = figure(&chart(ChartVariant::Basic));
        assert_eq!(fig["data"][0]["marker"]["color"], "#2ca02c");
        assert!(fig["data"][0].get("customdata").is_none());
        assert!(fig["layout"]["xaxis"].get("rangeslider").is_none());
        assert_eq!(fig["layout"]["width"], 900);
        assert_eq!(fig["layout"]["height"], 600);
    }

    #[test]
    fn gradient_layout_has_range_slider_and_fixed_axis() {
        let fig = figure(&chart(ChartVariant::Gradient));
        let xaxis = &fig["layout"]["xaxis"];
        assert_eq!(xaxis["rangeslider"]["visible"], true);
        assert_eq!(xaxis["range"], json!([0.0, 5.0]));
        assert_eq!(xaxis["dtick"], 0.5);
        assert_eq!(fig["data"][0]["customdata"], json!([15.0, 1.0]));
    }

    #[test]
    fn page_loads_plotly_and_names_every_factor() {
        let page = render_html(&chart(ChartVariant::Categorized)).unwrap();
        assert!(page.contains(PLOTLY_CDN));
        assert!(page.contains("\"study_load\""));
        assert!(page.contains("\"stress_level\""));
        assert!(page.contains("Plotly.newPlot(\"chart\""));
    }

    #[test]
    fn script_end_tags_in_names_are_escaped() {
        let mut c = chart(ChartVariant::Basic);
        c.points[0].name = "</script><b>".into();
        let page = render_html(&c).unwrap();
        assert!(!page.contains("</script><b>"));
        assert!(page.contains("<\\/script><b>"));
    }

    #[test]
    fn write_html_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatter_plot.html");
        std::fs::write(&path, "stale").unwrap();
        write_html(&chart(ChartVariant::Basic), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<!DOCTYPE html>"));
        assert!(!text.contains("stale"));
    }
}
