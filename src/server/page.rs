//! The single-page form served at `/`

use crate::config::{BatchConfig, FormConfig};

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Salary Prediction</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
  body { background-color: #f7f9fc; color: #333333; font-family: Arial, sans-serif; margin: 0; display: flex; }
  aside { width: 18rem; padding: 1.5rem; background: #eef1f6; min-height: 100vh; box-sizing: border-box; }
  main { flex: 1; padding: 1.5rem 2.5rem; }
  button { background-color: #4CAF50; color: white; padding: 10px; border-radius: 5px; border: none; cursor: pointer; }
  button:hover { background-color: #45a049; }
  .success { background: #e6f4ea; padding: 0.75rem 1rem; border-radius: 5px; }
  .error { background: #fdecea; color: #8a1c1c; padding: 0.75rem 1rem; border-radius: 5px; }
  table { border-collapse: collapse; margin: 1rem 0; }
  th, td { border: 1px solid #ccd3de; padding: 0.3rem 0.6rem; text-align: right; }
  .hidden { display: none; }
</style>
</head>
<body>
<aside>
  <h2>Input Options</h2>
  <label for="years">Enter Years of Experience:</label>
  <input id="years" type="number" min="{{MIN}}" max="{{MAX}}" step="{{STEP}}" value="{{DEFAULT}}">
  <p>Alternatively, upload a CSV file with a <code>{{INPUT_COLUMN}}</code> column:</p>
  <input id="upload" type="file" accept=".csv,text/csv">
</aside>
<main>
  <h1>Salary Prediction App</h1>
  <h3>Predict your salary based on years of experience using a machine learning model.</h3>
  <p>This app uses a <strong>Linear Regression Model</strong> for making salary predictions.</p>

  <button id="predict">Predict Salary</button>
  <div id="single" class="hidden">
    <p id="single-result"></p>
    <h3>Salary Trend Visualization</h3>
    <div id="trend-chart"></div>
  </div>

  <div id="batch" class="hidden">
    <h3>Predictions for the Uploaded Dataset:</h3>
    <div id="batch-table"></div>
    <button id="download">Download Predictions as CSV</button>
    <h3>Data Distribution and Comparison</h3>
    <div id="batch-chart"></div>
  </div>
  <p id="batch-error" class="error hidden"></p>
</main>
<script>
function show(id, visible) { document.getElementById(id).classList.toggle("hidden", !visible); }

function renderChart(target, spec) {
  const type = spec.kind === "line" ? "scatter" : "bar";
  const traces = spec.series.map(s => ({
    x: spec.x, y: s.values, name: s.name, type: type,
    mode: spec.kind === "line" ? "lines" : undefined,
  }));
  const layout = {
    title: spec.title || "",
    xaxis: { title: spec.x_label },
    yaxis: { title: spec.y_label },
    barmode: spec.kind === "grouped_bar" ? "group" : undefined,
    showlegend: spec.series.length > 1,
  };
  Plotly.newPlot(target, traces, layout);
}

function renderTable(columns, rows) {
  const table = document.createElement("table");
  const head = table.insertRow();
  columns.forEach(c => { const th = document.createElement("th"); th.textContent = c; head.appendChild(th); });
  rows.forEach(r => { const tr = table.insertRow(); r.forEach(v => { tr.insertCell().textContent = v; }); });
  const target = document.getElementById("batch-table");
  target.replaceChildren(table);
}

async function readError(response) {
  try { return (await response.json()).error.message; } catch (_) { return response.statusText; }
}

document.getElementById("predict").addEventListener("click", async () => {
  const years = parseFloat(document.getElementById("years").value);
  const response = await fetch("/v1/predict", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ years_experience: years }),
  });
  const result = document.getElementById("single-result");
  show("single", true);
  if (!response.ok) {
    result.className = "error";
    result.textContent = await readError(response);
    show("trend-chart", false);
    return;
  }
  const body = await response.json();
  result.className = "success";
  result.textContent = body.message;
  show("trend-chart", true);
  renderChart("trend-chart", body.chart);
});

let download = null;

document.getElementById("upload").addEventListener("change", async (event) => {
  const file = event.target.files[0];
  show("batch", false);
  show("batch-error", false);
  if (!file) { return; }

  const form = new FormData();
  form.append("file", file);
  const response = await fetch("/v1/predict/batch", { method: "POST", body: form });
  if (!response.ok) {
    document.getElementById("batch-error").textContent = await readError(response);
    show("batch-error", true);
    return;
  }
  const body = await response.json();
  download = { name: body.file_name, csv: body.csv };
  renderTable(body.columns, body.rows);
  show("batch", true);
  renderChart("batch-chart", body.chart);
});

document.getElementById("download").addEventListener("click", () => {
  if (!download) { return; }
  const url = URL.createObjectURL(new Blob([download.csv], { type: "text/csv" }));
  const link = document.createElement("a");
  link.href = url;
  link.download = download.name;
  link.click();
  URL.revokeObjectURL(url);
});
</script>
</body>
</html>
"##;

/// Render the page with the configured stepper bounds
pub fn render(form: &FormConfig, batch: &BatchConfig) -> String {
    TEMPLATE
        .replace("{{MIN}}", &form.min.to_string())
        .replace("{{MAX}}", &form.max.to_string())
        .replace("{{STEP}}", &form.step.to_string())
        .replace("{{DEFAULT}}", &form.default.to_string())
        .replace("{{INPUT_COLUMN}}", &escape_html(&batch.input_column))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
