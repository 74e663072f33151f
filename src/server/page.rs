//! HTML rendering for the interactive form page.
//!
//! The page is generated from the field registries, so widget metadata
//! (min/max/step/default) has a single source of truth in `stations`. No
//! template engine: the page is one self-contained document with inline
//! styles and a small fetch script against `/api/predict`.

use crate::model::PipelineVariant;
use crate::stations::{self, InputField};

/// Renders the complete form page.
pub fn render_index() -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Rio do Sul River Level Forecast</title>\n",
    );
    html.push_str(STYLES);
    html.push_str("</head>\n<body>\n<main>\n");
    html.push_str(
        "<h1>Rio do Sul River Level Forecast</h1>\n\
         <p class=\"subtitle\">Multivariate linear regression over upstream \
         sensor readings from Ituporanga and Taió.</p>\n<hr>\n",
    );

    html.push_str(&render_variant_section(
        PipelineVariant::Full,
        "Full forecast",
        "Uses river level and rainfall at both upstream stations.",
    ));
    html.push_str(&render_variant_section(
        PipelineVariant::RainOnly,
        "Rain-only forecast",
        "Uses only the rainfall readings, for when level sensors are down.",
    ));

    html.push_str(METHODOLOGY);
    html.push_str(
        "<hr>\n<p class=\"footnote\">Sensor data provided by the Santa Catarina \
         Civil Defense network.</p>\n",
    );
    html.push_str("</main>\n");
    html.push_str(SCRIPT);
    html.push_str("</body>\n</html>\n");
    html
}

fn render_variant_section(variant: PipelineVariant, title: &str, blurb: &str) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "<section>\n<h2>{}</h2>\n<p>{}</p>\n<form id=\"form-{}\" onsubmit=\"return false\">\n",
        title,
        blurb,
        variant.id()
    ));
    for field in stations::fields_for(variant) {
        s.push_str(&render_field(field));
    }
    s.push_str(&format!(
        "<button onclick=\"predict('{}')\">Predict river level</button>\n</form>\n",
        variant.id()
    ));
    s.push_str(&format!(
        "<div id=\"result-{v}\" class=\"result\" hidden>\n\
         <p class=\"metric\"><span id=\"metric-{v}\"></span></p>\n\
         <div class=\"gauge\"><div id=\"gauge-{v}\" class=\"gauge-fill\"></div></div>\n\
         <p id=\"condition-{v}\" class=\"condition\"></p>\n\
         </div>\n\
         <p id=\"error-{v}\" class=\"error\" hidden></p>\n\
         </section>\n",
        v = variant.id()
    ));
    s
}

fn render_field(field: &InputField) -> String {
    format!(
        "<label for=\"{id}\">{label} ({unit})</label>\n\
         <input type=\"number\" id=\"{id}\" name=\"{id}\" \
         min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{default}\">\n",
        id = field.id,
        label = field.label,
        unit = field.unit,
        min = field.min,
        max = field.max,
        step = field.step,
        default = field.default,
    )
}

const STYLES: &str = "<style>\n\
    body { font-family: system-ui, sans-serif; margin: 0; background: #f4f7fa; }\n\
    main { max-width: 40rem; margin: 0 auto; padding: 2rem 1rem; }\n\
    h1 { margin-bottom: 0.25rem; }\n\
    .subtitle { color: #556; margin-top: 0; }\n\
    section { background: #fff; border-radius: 8px; padding: 1rem 1.5rem; margin: 1rem 0; }\n\
    label { display: block; margin-top: 0.75rem; font-weight: 600; }\n\
    input { width: 100%; box-sizing: border-box; padding: 0.4rem; margin-top: 0.25rem; }\n\
    button { margin-top: 1rem; padding: 0.5rem 1.5rem; cursor: pointer; }\n\
    .metric { font-size: 1.6rem; font-weight: 700; margin: 0.75rem 0 0.5rem; }\n\
    .gauge { height: 0.8rem; background: #e3e8ee; border-radius: 4px; overflow: hidden; }\n\
    .gauge-fill { height: 100%; width: 0; background: #4a90d9; transition: width 0.3s; }\n\
    .condition { font-weight: 600; }\n\
    .condition.normal { color: #1b7f3a; }\n\
    .condition.attention { color: #b47d00; }\n\
    .condition.flood_alert { color: #b42318; }\n\
    .error { color: #b42318; }\n\
    .footnote { color: #778; font-size: 0.85rem; }\n\
    </style>\n";

const METHODOLOGY: &str = "<details>\n\
    <summary>Methodology and limitations</summary>\n\
    <h3>About the model</h3>\n\
    <ul>\n\
    <li><strong>Technique:</strong> multivariate linear regression over \
    standardized features</li>\n\
    <li><strong>Inputs:</strong> river level (cm) and rainfall (mm) at \
    Ituporanga and Taió</li>\n\
    <li><strong>Held-out performance:</strong> R&sup2; 0.96, RMSE 6.3 cm, \
    MAE 4.8 cm</li>\n\
    </ul>\n\
    <h3>Reading the result</h3>\n\
    <ul>\n\
    <li><strong>Below 100 cm:</strong> normal condition</li>\n\
    <li><strong>100&ndash;200 cm:</strong> attention, flooding risk in \
    low-lying areas</li>\n\
    <li><strong>200 cm and above:</strong> flood alert</li>\n\
    </ul>\n\
    <h3>Limitations</h3>\n\
    <ul>\n\
    <li>Forecasts are based on historical data only</li>\n\
    <li>Sudden extreme weather events are not modeled</li>\n\
    <li>Accuracy degrades outside the training range</li>\n\
    </ul>\n\
    </details>\n";

const SCRIPT: &str = "<script>\n\
    async function predict(variant) {\n\
      const inputs = document.querySelectorAll('#form-' + variant + ' input');\n\
      const features = Array.from(inputs).map(i => parseFloat(i.value));\n\
      const resultEl = document.getElementById('result-' + variant);\n\
      const errorEl = document.getElementById('error-' + variant);\n\
      resultEl.hidden = true;\n\
      errorEl.hidden = true;\n\
      const response = await fetch('/api/predict', {\n\
        method: 'POST',\n\
        headers: {'Content-Type': 'application/json'},\n\
        body: JSON.stringify({variant: variant, features: features}),\n\
      });\n\
      const body = await response.json();\n\
      if (!response.ok) {\n\
        errorEl.textContent = body.error;\n\
        errorEl.hidden = false;\n\
        return;\n\
      }\n\
      document.getElementById('metric-' + variant).textContent =\n\
        'Predicted level at Rio do Sul: ' + body.predicted.toFixed(1) + ' ' + body.unit;\n\
      document.getElementById('gauge-' + variant).style.width = body.gauge_percent + '%';\n\
      const conditionEl = document.getElementById('condition-' + variant);\n\
      conditionEl.textContent = body.message;\n\
      conditionEl.className = 'condition ' + body.condition;\n\
      resultEl.hidden = false;\n\
    }\n\
    </script>\n";

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
