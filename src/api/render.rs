//! HTML for the prediction page.

use std::fmt::Write;

use strum::IntoEnumIterator;

use crate::predictor::{Month, HUMIDITY_RANGE, WIND_SPEED_RANGE};

use super::page::{PageView, WeatherNotice};

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex}\
aside{width:22rem;padding:1rem;background:#eee}main{flex:1;padding:1rem 2rem}\
label{display:block;margin-top:.8rem}.ok{color:#1b5e20}.err{color:#b71c1c}\
table{border-collapse:collapse}td,th{border:1px solid #999;padding:.3rem .6rem}";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<title>Energy Consumption Prediction</title>");
    let _ = write!(html, "<style>{STYLE}</style></head><body>");

    html.push_str("<aside><form method=\"post\" action=\"/predict\">");
    html.push_str("<h2>Input Parameters</h2>");
    sidebar(&mut html, view);
    html.push_str("</form></aside>");

    html.push_str("<main><h1>Energy Consumption Prediction</h1>");
    html.push_str(
        "<p>This app predicts energy consumption based on <b>month</b>, <b>humidity</b>, \
         and <b>wind speed</b>. Use the inputs in the sidebar to get your prediction.</p>",
    );
    if let Some(error) = &view.error {
        let _ = write!(html, "<p class=\"err\">{}</p>", escape(error));
    } else if !view.model_available {
        let _ = write!(
            html,
            "<p class=\"err\">{}</p>",
            escape(&super::error::ApiError::ModelUnavailable.user_message())
        );
    }
    results(&mut html, view);
    html.push_str("</main></body></html>");
    html
}

fn sidebar(html: &mut String, view: &PageView<'_>) {
    let form = view.form;
    let input = &form.input;

    let _ = write!(
        html,
        "<label>Enter Location for Weather Data\
         <input type=\"text\" name=\"location\" value=\"{}\"></label>\
         <button type=\"submit\" formaction=\"/weather\">Fetch Weather Data</button>",
        escape(&form.location)
    );

    match &view.weather {
        Some(WeatherNotice::Fetched(w)) => {
            let _ = write!(
                html,
                "<div class=\"ok\"><p>Weather data fetched for {}:</p>\
                 <ul><li>Humidity: {}%</li><li>Wind Speed: {} km/h</li></ul></div>",
                escape(&w.location),
                w.humidity,
                w.wind_speed
            );
        }
        Some(WeatherNotice::Failed(message)) => {
            let _ = write!(html, "<p class=\"err\">{}</p>", escape(message));
        }
        None => {}
    }

    html.push_str("<label>Select Month<select name=\"month\">");
    for month in Month::iter() {
        let n = month.number();
        let selected = if n == input.month { " selected" } else { "" };
        let _ = write!(html, "<option value=\"{n}\"{selected}>{n} - {month}</option>");
    }
    html.push_str("</select></label>");

    let _ = write!(
        html,
        "<label>Humidity (%) <output>{h}</output>\
         <input type=\"range\" name=\"humidity\" min=\"{hmin}\" max=\"{hmax}\" step=\"1\" value=\"{h}\"></label>\
         <label>Wind Speed (km/h) <output>{w}</output>\
         <input type=\"range\" name=\"wind_speed\" min=\"{wmin}\" max=\"{wmax}\" step=\"0.1\" value=\"{w}\"></label>",
        h = input.humidity,
        hmin = HUMIDITY_RANGE.0,
        hmax = HUMIDITY_RANGE.1,
        w = input.wind_speed,
        wmin = WIND_SPEED_RANGE.0,
        wmax = WIND_SPEED_RANGE.1,
    );

    let _ = write!(
        html,
        "<label>Enter cost per kWh (in {currency}):\
         <input type=\"number\" name=\"cost_per_unit\" min=\"0\" step=\"{step}\" value=\"{cost}\"></label>",
        currency = escape(&view.defaults.currency),
        step = view.defaults.cost_step,
        cost = form.cost_per_unit,
    );

    let disabled = if view.model_available { "" } else { " disabled" };
    let _ = write!(html, "<p><button type=\"submit\"{disabled}>Predict</button></p>");
}

fn results(html: &mut String, view: &PageView<'_>) {
    let Some(outcome) = &view.prediction else {
        return;
    };
    let r = &outcome.report;

    let _ = write!(
        html,
        "<p class=\"ok\">Predicted Energy Consumption: <b>{:.2} kWh</b></p>",
        r.predicted_consumption
    );

    let _ = write!(
        html,
        "<h3>Prediction Report</h3><table>\
         <tr><th>Month</th><th>Humidity (%)</th><th>Wind Speed (km/h)</th>\
         <th>Predicted Energy Consumption (kWh)</th></tr>\
         <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr></table>",
        r.month, r.humidity, r.wind_speed, r.predicted_consumption
    );

    let _ = write!(
        html,
        "<p><a href=\"/report.csv?month={}&amp;humidity={}&amp;wind_speed={}\" download>\
         Download Prediction Report</a></p>",
        r.month, r.humidity, r.wind_speed
    );

    let _ = write!(
        html,
        "<h3>Energy Cost Estimation</h3>\
         <p class=\"ok\">Estimated Energy Cost: <b>{:.2} {}/-</b></p>",
        outcome.cost.energy_cost,
        escape(&view.defaults.currency)
    );
}
