//! Social insurance contribution calculation.
//!
//! Employer contributions (JKK, JKM, BPJS Kesehatan) are a benefit in kind
//! and form part of gross income. Employee contributions (JHT, JP and,
//! when configured, BPJS Kesehatan) reduce net income.

use rust_decimal::Decimal;

use crate::config::ContributionParameters;
use crate::models::{AuditStep, EmployeeInsuranceContribution, EmployerInsuranceContribution};

/// Computes the employer-paid contributions for a monthly salary.
///
/// Health insurance is charged on the salary capped at `caps.bpjskes`.
///
/// # Examples
///
/// ```
/// use pph21_engine::calculation::calculate_employer_contribution;
/// use pph21_engine::config::ContributionParameters;
/// use rust_decimal::Decimal;
///
/// let params = ContributionParameters::default();
/// let contribution = calculate_employer_contribution(Decimal::new(10_000_000, 0), &params);
/// assert_eq!(contribution.jkk, Decimal::new(24_000, 0));
/// assert_eq!(contribution.bpjskes, Decimal::new(400_000, 0));
/// ```
pub fn calculate_employer_contribution(
    salary: Decimal,
    params: &ContributionParameters,
) -> EmployerInsuranceContribution {
    let rates = &params.employer;
    EmployerInsuranceContribution {
        jkk: salary * rates.jkk_rate,
        jkm: salary * rates.jkm_rate,
        bpjskes: salary.min(params.caps.bpjskes) * rates.bpjskes_rate,
    }
}

/// Computes the employee-paid contributions for a monthly salary.
///
/// Pension is charged on the salary capped at `caps.jp`.
pub fn calculate_employee_contribution(
    salary: Decimal,
    params: &ContributionParameters,
) -> EmployeeInsuranceContribution {
    let rates = &params.employee;
    EmployeeInsuranceContribution {
        jht: salary * rates.jht_rate,
        jp: salary.min(params.caps.jp) * rates.jp_rate,
        bpjskes: rates
            .bpjskes_rate
            .map(|rate| salary.min(params.caps.bpjskes) * rate),
    }
}

/// The result of the contribution step, including audit steps.
#[derive(Debug, Clone)]
pub struct InsuranceContributionResult {
    /// Employer-paid contributions.
    pub employer: EmployerInsuranceContribution,
    /// Employee-paid contributions.
    pub employee: EmployeeInsuranceContribution,
    /// One audit step for each side.
    pub audit_steps: Vec<AuditStep>,
}

/// Computes both contribution sides and records each as an audit step.
pub fn calculate_insurance_contributions(
    salary: Decimal,
    params: &ContributionParameters,
    step_number: u32,
) -> InsuranceContributionResult {
    let employer = calculate_employer_contribution(salary, params);
    let employee = calculate_employee_contribution(salary, params);

    let employer_step = AuditStep {
        step_number,
        rule_id: "employer_contribution".to_string(),
        rule_name: "Employer Insurance Contribution".to_string(),
        regulation_ref: "PP 44/2015; Perpres 82/2018".to_string(),
        input: serde_json::json!({
            "salary": salary.normalize().to_string(),
            "bpjskes_salary_cap": params.caps.bpjskes.normalize().to_string()
        }),
        output: serde_json::json!({
            "jkk": employer.jkk.normalize().to_string(),
            "jkm": employer.jkm.normalize().to_string(),
            "bpjskes": employer.bpjskes.normalize().to_string(),
            "total": employer.total().normalize().to_string()
        }),
        reasoning: format!(
            "JKK {} + JKM {} + BPJS Kesehatan {} = {} added to gross income",
            employer.jkk.normalize(),
            employer.jkm.normalize(),
            employer.bpjskes.normalize(),
            employer.total().normalize()
        ),
    };

    let mut employee_output = serde_json::json!({
        "jht": employee.jht.normalize().to_string(),
        "jp": employee.jp.normalize().to_string(),
        "total": employee.total().normalize().to_string()
    });
    if let Some(bpjskes) = employee.bpjskes {
        employee_output["bpjskes"] = serde_json::json!(bpjskes.normalize().to_string());
    }

    let employee_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "employee_contribution".to_string(),
        rule_name: "Employee Insurance Contribution".to_string(),
        regulation_ref: "PP 45/2015; PP 46/2015".to_string(),
        input: serde_json::json!({
            "salary": salary.normalize().to_string(),
            "jp_salary_cap": params.caps.jp.normalize().to_string()
        }),
        output: employee_output,
        reasoning: format!(
            "JHT {} + JP {} on min(salary, {}) = {} deducted from income",
            employee.jht.normalize(),
            employee.jp.normalize(),
            params.caps.jp.normalize(),
            employee.total().normalize()
        ),
    };

    InsuranceContributionResult {
        employer,
        employee,
        audit_steps: vec![employer_step, employee_step],
    }
}
