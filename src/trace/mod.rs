//! Interactive trace diagnostics of posterior chains.
//!
//! The dashboard is a self-contained HTML page embedding declarative chart
//! specs over a `data.json` export. Filtering by burn-in and histogram
//! binning happen in the charting layer at view time; the only imperative
//! work here is joining the per-chain log tables, computing the burn-in
//! slider bounds, and the cross-chain convergence diagnostics.

pub mod diagnostics;

use crate::chain;
use crate::chain::PosteriorChain;
use crate::table::Table;
use crate::utils;
use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr};
use color_eyre::Help;
use indoc::formatdoc;
use itertools::Itertools;
use log::info;
use serde_json::json;
use std::path::PathBuf;

/// Parameter that is always traced, whether requested or not.
pub const IMPLICIT_PARAMETER: &str = "likelihood";

/// Relative URL of the data export next to the dashboard.
pub const DATA_FILE: &str = "data.json";

// ----------------------------------------------------------------------------
// Arguments

/// Arguments for the trace dashboard.
#[derive(Clone, Debug, Parser)]
#[clap(verbatim_doc_comment)]
pub struct Args {
    /// Posterior chain directories to visualize together.
    #[clap(short = 'c', long, required = true, num_args = 1..)]
    pub chains: Vec<PathBuf>,

    /// Posterior log columns to plot, besides the implicit likelihood trace.
    #[clap(short = 'p', long, num_args = 0..)]
    pub parameters: Vec<String>,

    /// Output directory for the dashboard and its data export.
    #[clap(short = 'o', long, required = true)]
    pub output_dir: PathBuf,
}

// ----------------------------------------------------------------------------
// Series Assembly

/// One traced parameter across all chains.
#[derive(Clone, Debug)]
pub struct ParameterTrace {
    pub name: String,
    /// Sampled values, one vector per chain.
    pub values: Vec<Vec<f64>>,
    /// Per-chain means.
    pub means: Vec<f64>,
    /// Gelman-Rubin diagnostic, present with two or more chains.
    pub psrf: Option<f64>,
}

/// The traced parameters: the implicit likelihood first, then the requested
/// columns in order, deduplicated.
pub fn selected_parameters(requested: &[String]) -> Vec<String> {
    std::iter::once(IMPLICIT_PARAMETER.to_string())
        .chain(requested.iter().cloned())
        .unique()
        .collect_vec()
}

/// Assemble one parameter's trace across the chain logs.
pub fn parameter_trace(logs: &[Table<String>], name: &str) -> Result<ParameterTrace, Report> {
    let values = logs
        .iter()
        .map(|log| {
            log.get_column(name)?
                .into_iter()
                .map(|v| {
                    v.parse::<f64>().wrap_err_with(|| {
                        format!("Failed to parse value {v:?} of parameter {name:?}")
                    })
                })
                .collect::<Result<Vec<f64>, Report>>()
        })
        .collect::<Result<Vec<_>, Report>>()
        .suggestion("Parameters must be column names of the posterior log.")?;

    let means = values.iter().map(|v| diagnostics::mean(v)).collect_vec();
    let psrf = diagnostics::potential_scale_reduction(&values);

    Ok(ParameterTrace { name: name.to_string(), values, means, psrf })
}

/// Flatten the chain logs into chart records, keyed by a 1-based chain index.
fn data_records(
    logs: &[Table<String>],
    parameters: &[String],
) -> Result<Vec<serde_json::Value>, Report> {
    let mut records = Vec::new();
    for (chain_i, log) in logs.iter().enumerate() {
        let states = log.get_column("state")?;
        let columns = parameters
            .iter()
            .map(|p| log.get_column(p))
            .collect::<Result<Vec<_>, Report>>()?;

        for (row_i, state) in states.iter().enumerate() {
            let state: u64 = state
                .parse()
                .wrap_err_with(|| format!("Failed to parse generation index: {state}"))?;
            let mut record = serde_json::Map::new();
            record.insert("chain".to_string(), json!(chain_i + 1));
            record.insert("state".to_string(), json!(state));
            for (parameter, column) in parameters.iter().zip(columns.iter()) {
                let value: f64 = column[row_i].parse().wrap_err_with(|| {
                    format!("Failed to parse value {:?} of parameter {parameter:?}", column[row_i])
                })?;
                record.insert(parameter.clone(), json!(value));
            }
            records.push(serde_json::Value::Object(record));
        }
    }
    Ok(records)
}

// ----------------------------------------------------------------------------
// Chart Specs

/// Escape field names so the charting layer does not treat dots as nested
/// record access (ex. `clock.rate`).
fn chart_field(name: &str) -> String {
    name.replace('.', "\\.")
}

/// Time series and histogram panel of one parameter.
///
/// The first panel owns the burn-in slider; its signal is referenced by the
/// filters of every panel so one slider adjusts the whole dashboard.
fn parameter_panel(parameter: &str, with_slider: bool, gen_end: u64, gen_step: u64) -> serde_json::Value {
    let field = chart_field(parameter);
    let burnin_filter = json!([{ "filter": "datum.state >= burnin" }]);

    let mut line = json!({
        "width": 700,
        "height": 220,
        "mark": {"type": "line", "interpolate": "step"},
        "transform": burnin_filter.clone(),
        "encoding": {
            "x": {"field": "state", "type": "quantitative", "title": "Generation"},
            "y": {
                "field": field,
                "type": "quantitative",
                "scale": {"zero": false},
                "title": parameter
            },
            "color": {"field": "chain", "type": "nominal", "title": "Chain"}
        }
    });
    if with_slider {
        line["params"] = json!([{
            "name": "burnin",
            "value": 0,
            "bind": {
                "input": "range",
                "min": 0,
                "max": gen_end,
                "step": gen_step,
                "name": "Burn-in: "
            }
        }]);
    }

    let histogram = json!({
        "width": 180,
        "height": 220,
        "mark": "bar",
        "transform": burnin_filter,
        "encoding": {
            "x": {"aggregate": "count", "title": "Frequency"},
            "y": {"field": field, "bin": true, "type": "quantitative", "title": null},
            "color": {"field": "chain", "type": "nominal", "title": "Chain"}
        }
    });

    json!({ "hconcat": [line, histogram] })
}

/// The full dashboard spec: one panel row per traced parameter.
pub fn dashboard_spec(parameters: &[String], gen_end: u64, gen_step: u64) -> serde_json::Value {
    let panels = parameters
        .iter()
        .enumerate()
        .map(|(i, p)| parameter_panel(p, i == 0, gen_end, gen_step))
        .collect_vec();

    json!({
        "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
        "data": {"url": DATA_FILE},
        "vconcat": panels,
        "resolve": {"scale": {"color": "shared"}}
    })
}

/// Diagnostics summary rows rendered above the charts.
fn summary_table(traces: &[ParameterTrace]) -> String {
    let rows = traces
        .iter()
        .map(|trace| {
            let means = trace
                .means
                .iter()
                .enumerate()
                .map(|(i, m)| format!("chain {}: {m:.4}", i + 1))
                .join(", ");
            let psrf = match trace.psrf {
                Some(psrf) => format!("{psrf:.4}"),
                None => "n/a (single chain)".to_string(),
            };
            format!(
                "<tr><td>{name}</td><td>{means}</td><td>{psrf}</td></tr>",
                name = trace.name
            )
        })
        .join("\n      ");

    formatdoc! {r#"
        <table>
          <thead>
            <tr><th>Parameter</th><th>Mean</th><th>Potential scale reduction</th></tr>
          </thead>
          <tbody>
          {rows}
          </tbody>
        </table>"#}
}

fn dashboard_html(traces: &[ParameterTrace], spec: &serde_json::Value) -> Result<String, Report> {
    let spec = serde_json::to_string_pretty(spec)
        .wrap_err("Failed to serialize the dashboard chart spec.")?;
    let summary = summary_table(traces);

    Ok(formatdoc! {r##"
        <!DOCTYPE html>
        <html>
        <head>
          <meta charset="utf-8"/>
          <title>Posterior trace diagnostics</title>
          <script src="https://cdn.jsdelivr.net/npm/vega@5"></script>
          <script src="https://cdn.jsdelivr.net/npm/vega-lite@5"></script>
          <script src="https://cdn.jsdelivr.net/npm/vega-embed@6"></script>
          <style>
            body {{ font-family: sans-serif; margin: 2em; }}
            table {{ border-collapse: collapse; margin-bottom: 2em; }}
            th, td {{ border: 1px solid #ccc; padding: 0.4em 0.8em; text-align: left; }}
          </style>
        </head>
        <body>
          <h1>Posterior trace diagnostics</h1>
          {summary}
          <div id="vis"></div>
          <script>
            const spec = {spec};
            vegaEmbed("#vis", spec);
          </script>
        </body>
        </html>"##})
}

// ----------------------------------------------------------------------------
// Traceplot

/// Render the trace dashboard and its data export for a set of chains.
pub fn traceplot(args: &Args) -> Result<(), Report> {
    let chains = args
        .chains
        .iter()
        .map(PosteriorChain::open)
        .collect::<Result<Vec<_>, Report>>()?;

    // chains of different models cannot be visualized together
    let checksum = chain::shared_checksum(&chains)?;
    info!("Tracing {} chains with control-file checksum {checksum}.", chains.len());

    let logs = chains.iter().map(|c| c.read_log()).collect::<Result<Vec<_>, Report>>()?;

    let parameters = selected_parameters(&args.parameters);
    let traces = parameters
        .iter()
        .map(|p| parameter_trace(&logs, p))
        .collect::<Result<Vec<_>, Report>>()?;

    // slider bounds come from the last two generation indices of the first log
    let (gen_end, gen_step) = chain::generation_bounds(&logs[0])?;

    let records = data_records(&logs, &parameters)?;
    let spec = dashboard_spec(&parameters, gen_end, gen_step);
    let html = dashboard_html(&traces, &spec)?;

    let output_dir = utils::create_fresh_dir(&args.output_dir)?;

    let data_path = output_dir.join(DATA_FILE);
    let data = serde_json::to_string(&records)
        .wrap_err("Failed to serialize the dashboard data export.")?;
    std::fs::write(&data_path, data)
        .wrap_err_with(|| format!("Failed to write data export: {data_path:?}"))?;

    let index_path = output_dir.join("index.html");
    std::fs::write(&index_path, html)
        .wrap_err_with(|| format!("Failed to write dashboard: {index_path:?}"))?;

    info!("Trace dashboard written to: {index_path:?}");
    Ok(())
}
