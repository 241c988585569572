//! HTML rendering for the calculator page.
//!
//! The page is a single form; after a successful submission it also shows
//! the breakdown of the calculation with amounts formatted as rupiah.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::RegulationMetadata;
use crate::models::{CalculationResult, TaxpayerStatus};

use super::request::TaxInput;

/// Formats an amount as Indonesian rupiah, e.g. `Rp 1.234.567,89`.
///
/// Amounts are rounded to two decimals with midpoints rounded away from
/// zero. A non-breaking space separates the symbol from the number.
///
/// # Examples
///
/// ```
/// use pph21_engine::api::format_idr;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_idr(Decimal::new(123_456_789, 2)), "Rp\u{a0}1.234.567,89");
/// assert_eq!(format_idr(Decimal::new(-5_000, 0)), "-Rp\u{a0}5.000,00");
/// ```
pub fn format_idr(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let plain = format!("{:.2}", rounded.abs());
    let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{}Rp\u{a0}{},{}", sign, grouped, fraction)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn status_options(selected: Option<TaxpayerStatus>) -> String {
    TaxpayerStatus::ALL
        .iter()
        .map(|status| {
            let marker = if Some(*status) == selected {
                " selected"
            } else {
                ""
            };
            format!(
                r#"          <option value="{code}"{marker}>{code}</option>"#,
                code = status.code(),
                marker = marker
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn result_rows(input: &TaxInput, result: &CalculationResult) -> String {
    let mut rows: Vec<(&str, String)> = vec![
        ("Gaji", format_idr(input.salary)),
        ("Bonus", format_idr(input.bonus)),
        ("Kategori TER", result.tax_rate_category.label().to_string()),
        ("JKK (pemberi kerja)", format_idr(result.employer_insurance_contribution.jkk)),
        ("JKM (pemberi kerja)", format_idr(result.employer_insurance_contribution.jkm)),
        (
            "BPJS Kesehatan (pemberi kerja)",
            format_idr(result.employer_insurance_contribution.bpjskes),
        ),
        ("JHT (pegawai)", format_idr(result.employee_insurance_contribution.jht)),
        ("JP (pegawai)", format_idr(result.employee_insurance_contribution.jp)),
    ];
    if let Some(bpjskes) = result.employee_insurance_contribution.bpjskes {
        rows.push(("BPJS Kesehatan (pegawai)", format_idr(bpjskes)));
    }
    rows.extend([
        ("Penghasilan bruto sebulan", format_idr(result.gross_monthly_income)),
        ("Biaya jabatan", format_idr(result.occupational_expense)),
        ("Penghasilan neto sebulan", format_idr(result.net_monthly_income)),
        ("Penghasilan neto setahun", format_idr(result.net_yearly_income)),
        ("PTKP", format_idr(result.non_taxable_income)),
        ("Penghasilan kena pajak", format_idr(result.taxable_income)),
        ("PPh21 bulan reguler", format_idr(result.regular_month_tax)),
        ("PPh21 10 bulan reguler", format_idr(result.regular_months_tax())),
        ("PPh21 bulan bonus", format_idr(result.bonus_month_tax)),
    ]);
    if result.has_december_refund() {
        rows.push((
            "Lebih bayar PPh21 Desember (dikembalikan)",
            format_idr(-result.december_month_tax),
        ));
    } else {
        rows.push(("PPh21 Desember", format_idr(result.december_month_tax)));
    }
    rows.extend([
        ("Total PPh21 setahun", format_idr(result.total_tax)),
        ("Take home pay bulan reguler", format_idr(result.regular_month_take_home_pay)),
        ("Take home pay bulan bonus", format_idr(result.bonus_month_take_home_pay)),
        ("Take home pay Desember", format_idr(result.december_take_home_pay)),
    ]);

    rows.iter()
        .map(|(label, value)| {
            format!(
                "        <tr><th>{}</th><td>{}</td></tr>",
                escape_html(label),
                escape_html(value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the calculator page, with the breakdown when a result is given.
pub fn render_page(
    regulation: &RegulationMetadata,
    submission: Option<(&TaxInput, &CalculationResult)>,
) -> String {
    let selected = submission.map(|(input, _)| input.status);
    let (salary_value, bonus_value) = submission
        .map(|(input, _)| (input.salary.to_string(), input.bonus.to_string()))
        .unwrap_or_default();
    let results = submission
        .map(|(input, result)| {
            format!(
                "    <table class=\"result\">\n{}\n    </table>\n",
                result_rows(input, result)
            )
        })
        .unwrap_or_default();

    format!(
        r##"<!DOCTYPE html>
<html lang="id">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Kalkulator PPh21</title>
</head>
<body>
    <h1>Kalkulator PPh21</h1>
    <p>{regulation} ({code}), berlaku sejak {effective_date}</p>
    <form method="post" action="/">
      <label>Status
        <select name="status">
{options}
        </select>
      </label>
      <label>Gaji sebulan <input type="number" name="salary" min="0" step="any" value="{salary}" required></label>
      <label>Bonus <input type="number" name="bonus" min="0" step="any" value="{bonus}" required></label>
      <button type="submit">Hitung</button>
    </form>
{results}</body>
</html>
"##,
        regulation = escape_html(&regulation.name),
        code = escape_html(&regulation.code),
        effective_date = regulation.effective_date.format("%d-%m-%Y"),
        options = status_options(selected),
        salary = salary_value,
        bonus = bonus_value,
        results = results,
    )
}
