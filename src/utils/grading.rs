//! Grading rules: value normalization, remarks, GWA and completion eligibility.
//!
//! Numeric grades are kept in hundredths so that `1.25` compares exactly.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::errors::{GradeSysError, Result};
use crate::models::grades::entities::GradeRemark;
use crate::models::grades::responses::{CompletionEligibility, CompletionIneligibility};

/// Passing numeric grades in hundredths, best first
pub const PASSING_GRADES: [u16; 9] = [100, 125, 150, 175, 200, 225, 250, 275, 300];
pub const FAILING_GRADE: u16 = 500;
/// Stored value of an incomplete grade
pub const INCOMPLETE: &str = "INC";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeValue {
    /// Hundredths, e.g. `175` for `1.75`
    Numeric(u16),
    Incomplete,
    Dropped,
    Withdrawn,
}

impl GradeValue {
    /// Trims and uppercases, then accepts a letter mark or an allowed number
    /// written with any decimal formatting (`"1"`, `"1.0"`, `"1.00"`).
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "" => return Err(GradeSysError::validation("Grade value is empty")),
            "INC" => return Ok(GradeValue::Incomplete),
            "DRP" => return Ok(GradeValue::Dropped),
            "W" => return Ok(GradeValue::Withdrawn),
            _ => {}
        }

        let number: f64 = normalized
            .parse()
            .map_err(|_| GradeSysError::validation(format!("Invalid grade value: {input}")))?;
        let scaled = number * 100.0;
        let rounded = scaled.round();
        if !number.is_finite() || (scaled - rounded).abs() > 1e-6 || rounded < 0.0 {
            return Err(GradeSysError::validation(format!(
                "Invalid grade value: {input}"
            )));
        }

        let hundredths = rounded as u16;
        if PASSING_GRADES.contains(&hundredths) || hundredths == FAILING_GRADE {
            Ok(GradeValue::Numeric(hundredths))
        } else {
            Err(GradeSysError::validation(format!(
                "Grade {input} is not on the grading scale (1.00-3.00 in 0.25 steps, 5.00, INC, DRP, W)"
            )))
        }
    }

    pub fn numeric(&self) -> Option<f64> {
        match self {
            GradeValue::Numeric(h) => Some(f64::from(*h) / 100.0),
            _ => None,
        }
    }

    pub fn remarks(&self) -> GradeRemark {
        match self {
            GradeValue::Numeric(FAILING_GRADE) => GradeRemark::Failed,
            GradeValue::Numeric(_) => GradeRemark::Passed,
            GradeValue::Incomplete => GradeRemark::Incomplete,
            GradeValue::Dropped => GradeRemark::Dropped,
            GradeValue::Withdrawn => GradeRemark::Withdrawn,
        }
    }

    /// Membership in {5.00, INC, DRP, W}
    pub fn is_non_passing(&self) -> bool {
        self.remarks() != GradeRemark::Passed
    }
}

impl fmt::Display for GradeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeValue::Numeric(h) => write!(f, "{}.{:02}", h / 100, h % 100),
            GradeValue::Incomplete => f.write_str("INC"),
            GradeValue::Dropped => f.write_str("DRP"),
            GradeValue::Withdrawn => f.write_str("W"),
        }
    }
}

/// Normalized string form, as stored in the `grades.value` column
pub fn normalize(input: &str) -> Result<String> {
    GradeValue::parse(input).map(|v| v.to_string())
}

/// Remarks of a stored value; `None` for values that no longer parse
pub fn remarks_of(stored: &str) -> Option<GradeRemark> {
    GradeValue::parse(stored).ok().map(|v| v.remarks())
}

/// A completion replaces `INC` with a numeric grade only
pub fn parse_completion_value(input: &str) -> Result<GradeValue> {
    match GradeValue::parse(input)? {
        value @ GradeValue::Numeric(_) => Ok(value),
        other => Err(GradeSysError::validation(format!(
            "Completion grade must be numeric, got {other}"
        ))),
    }
}

/// General weighted average over numeric grades, rounded to 4 decimals
pub fn gwa<'a, I>(grades: I) -> Option<f64>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let (weighted, units) = grades
        .into_iter()
        .filter_map(|(value, units)| {
            GradeValue::parse(value)
                .ok()
                .and_then(|v| v.numeric())
                .map(|g| (g * units, units))
        })
        .fold((0.0, 0.0), |(w, u), (gw, gu)| (w + gw, u + gu));

    if units <= 0.0 {
        return None;
    }
    Some((weighted / units * 10_000.0).round() / 10_000.0)
}

pub fn completion_deadline(recorded_at: DateTime<Utc>, window_days: i64) -> DateTime<Utc> {
    recorded_at + Duration::days(window_days)
}

/// Evaluates the three eligibility rules in order
pub fn completion_eligibility(
    stored_value: &str,
    already_completed: bool,
    recorded_at: DateTime<Utc>,
    now: DateTime<Utc>,
    window_days: i64,
) -> CompletionEligibility {
    let deadline = completion_deadline(recorded_at, window_days);
    let reason = if GradeValue::parse(stored_value).ok() != Some(GradeValue::Incomplete) {
        Some(CompletionIneligibility::NotIncomplete)
    } else if already_completed {
        Some(CompletionIneligibility::AlreadyCompleted)
    } else if now > deadline {
        Some(CompletionIneligibility::WindowExpired)
    } else {
        None
    };

    CompletionEligibility {
        eligible: reason.is_none(),
        reason,
        deadline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values_normalize_to_two_decimals() {
        assert_eq!(normalize("1").unwrap(), "1.00");
        assert_eq!(normalize("1.0").unwrap(), "1.00");
        assert_eq!(normalize(" 1.00 ").unwrap(), "1.00");
        assert_eq!(normalize("2.5").unwrap(), "2.50");
        assert_eq!(normalize("1.750").unwrap(), "1.75");
        assert_eq!(normalize("5").unwrap(), "5.00");
    }

    #[test]
    fn letter_marks_are_case_insensitive() {
        assert_eq!(normalize("inc").unwrap(), "INC");
        assert_eq!(normalize("Drp").unwrap(), "DRP");
        assert_eq!(normalize("w").unwrap(), "W");
    }

    #[test]
    fn off_scale_values_are_rejected() {
        for bad in ["", "4.00", "3.10", "0.75", "1.3", "abc", "-1", "NaN", "3.005"] {
            assert!(normalize(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn non_passing_membership() {
        for v in ["5.00", "INC", "DRP", "W"] {
            assert!(GradeValue::parse(v).unwrap().is_non_passing(), "{v}");
        }
        for v in ["1.00", "2.25", "3.00"] {
            assert!(!GradeValue::parse(v).unwrap().is_non_passing(), "{v}");
        }
    }

    #[test]
    fn remarks_follow_the_value() {
        assert_eq!(remarks_of("3.00"), Some(GradeRemark::Passed));
        assert_eq!(remarks_of("5.00"), Some(GradeRemark::Failed));
        assert_eq!(remarks_of("INC"), Some(GradeRemark::Incomplete));
        assert_eq!(remarks_of("DRP"), Some(GradeRemark::Dropped));
        assert_eq!(remarks_of("W"), Some(GradeRemark::Withdrawn));
        assert_eq!(remarks_of("garbage"), None);
    }

    #[test]
    fn gwa_weights_by_units_and_ignores_letter_marks() {
        let grades = [("1.00", 3.0), ("2.00", 3.0), ("INC", 3.0), ("1.50", 2.0)];
        // (3 + 6 + 3) / 8
        assert_eq!(gwa(grades), Some(1.5));
        assert_eq!(gwa([("INC", 3.0), ("W", 2.0)]), None);
        assert_eq!(gwa(std::iter::empty::<(&str, f64)>()), None);
    }

    #[test]
    fn gwa_rounds_to_four_decimals() {
        let grades = [("1.25", 3.0), ("1.75", 3.0), ("2.00", 1.0)];
        // 11.0 / 7 = 1.571428...
        assert_eq!(gwa(grades), Some(1.5714));
    }

    #[test]
    fn completion_value_must_be_numeric() {
        assert_eq!(
            parse_completion_value("2").unwrap(),
            GradeValue::Numeric(200)
        );
        assert!(parse_completion_value("INC").is_err());
        assert!(parse_completion_value("W").is_err());
    }

    #[test]
    fn eligibility_rules_apply_in_order() {
        let recorded = Utc::now() - Duration::days(10);
        let now = Utc::now();

        let ok = completion_eligibility("INC", false, recorded, now, 365);
        assert!(ok.eligible);
        assert_eq!(ok.reason, None);
        assert_eq!(ok.deadline, recorded + Duration::days(365));

        let not_inc = completion_eligibility("2.00", false, recorded, now, 365);
        assert_eq!(not_inc.reason, Some(CompletionIneligibility::NotIncomplete));

        // NotIncomplete wins over AlreadyCompleted
        let both = completion_eligibility("1.75", true, recorded, now, 365);
        assert_eq!(both.reason, Some(CompletionIneligibility::NotIncomplete));

        let done = completion_eligibility("INC", true, recorded, now, 365);
        assert_eq!(done.reason, Some(CompletionIneligibility::AlreadyCompleted));

        let expired = completion_eligibility("INC", false, recorded, now, 5);
        assert_eq!(expired.reason, Some(CompletionIneligibility::WindowExpired));
        assert!(!expired.eligible);
    }

    #[test]
    fn deadline_day_itself_is_still_eligible() {
        let recorded = Utc::now() - Duration::days(30);
        let deadline = completion_deadline(recorded, 30);
        assert!(completion_eligibility("INC", false, recorded, deadline, 30).eligible);
    }
}
