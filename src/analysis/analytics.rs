use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; null for a single observation.
    pub std: Option<f64>,
    pub min: f64,
    #[serde(rename = "25%")]
    pub q1: f64,
    #[serde(rename = "50%")]
    pub median: f64,
    #[serde(rename = "75%")]
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Serialize)]
pub struct TabularAnalysis {
    pub count: usize,
    pub columns: Vec<String>,
    pub summary: Map<String, Value>,
}

/// Basic describe() over arbitrary tabular JSON. Accepts either a
/// column-oriented object (`{"col": [..], ..}`) or an array of row
/// objects; numeric columns get a quartile summary.
pub fn summarize_tabular(data: &Value) -> Result<TabularAnalysis, String> {
    let columns = collect_columns(data)?;

    let count = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    let names: Vec<String> = columns.iter().map(|(n, _)| n.clone()).collect();

    let mut summary = Map::new();
    for (name, values) in &columns {
        if let Some(numbers) = numeric_values(values) {
            let column = describe(&numbers);
            summary.insert(
                name.clone(),
                serde_json::to_value(column).map_err(|e| e.to_string())?,
            );
        }
    }

    Ok(TabularAnalysis {
        count,
        columns: names,
        summary,
    })
}

fn collect_columns(data: &Value) -> Result<Vec<(String, Vec<Value>)>, String> {
    match data {
        Value::Object(map) => Ok(map
            .iter()
            .map(|(name, value)| match value {
                Value::Array(items) => (name.clone(), items.clone()),
                scalar => (name.clone(), vec![scalar.clone()]),
            })
            .collect()),
        Value::Array(rows) => {
            let mut names: Vec<String> = Vec::new();
            for row in rows {
                let obj = row
                    .as_object()
                    .ok_or_else(|| "array input must contain objects".to_string())?;
                for key in obj.keys() {
                    if !names.contains(key) {
                        names.push(key.clone());
                    }
                }
            }
            Ok(names
                .into_iter()
                .map(|name| {
                    let values = rows
                        .iter()
                        .map(|row| row.get(&name).cloned().unwrap_or(Value::Null))
                        .collect();
                    (name, values)
                })
                .collect())
        }
        _ => Err("expected a JSON object of columns or an array of rows".to_string()),
    }
}

/// A column is numeric when every non-null entry is a number and at least
/// one entry is present.
fn numeric_values(values: &[Value]) -> Option<Vec<f64>> {
    let mut numbers = Vec::new();
    for value in values {
        match value {
            Value::Number(n) => numbers.push(n.as_f64()?),
            Value::Null => {}
            _ => return None,
        }
    }
    if numbers.is_empty() {
        None
    } else {
        Some(numbers)
    }
}

/// Linear-interpolation quantile over a sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
    }
}

fn describe(numbers: &[f64]) -> ColumnSummary {
    let mut sorted = numbers.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std = if n > 1 {
        let variance =
            sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        Some(variance.sqrt())
    } else {
        None
    };

    ColumnSummary {
        count: n,
        mean,
        std,
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[n - 1],
    }
}
