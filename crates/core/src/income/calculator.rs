//! Wage and absence-effect calculations.

use rust_decimal::Decimal;

use super::types::{AbsenceEffect, AbsenceRecord, AbsenceType, UserSettings};

/// Yearly income cap applied to child-care ("VAB") absence deductions.
fn child_care_income_cap() -> Decimal {
    Decimal::from(410_000_u32)
}

/// Flat compensation rate paid back for every absence type.
fn compensation_rate() -> Decimal {
    Decimal::new(80, 2)
}

/// Income calculation service.
///
/// All functions are pure; a settings record with zero work hours yields
/// zero rather than dividing by zero.
pub struct IncomeCalculator;

impl IncomeCalculator {
    /// Hourly wage: yearly income over yearly work hours.
    #[must_use]
    pub fn hourly_wage(settings: &UserSettings) -> Decimal {
        if settings.yearly_work_hours == 0 {
            return Decimal::ZERO;
        }
        settings.yearly_income / Decimal::from(settings.yearly_work_hours)
    }

    /// Gross monthly income: hourly wage times a month's share of the
    /// yearly hours.
    #[must_use]
    pub fn monthly_income(settings: &UserSettings) -> Decimal {
        if settings.yearly_work_hours == 0 {
            return Decimal::ZERO;
        }
        let monthly_hours = Decimal::from(settings.yearly_work_hours) / Decimal::from(12_u32);
        Self::hourly_wage(settings) * monthly_hours
    }

    /// Yearly income after tax.
    #[must_use]
    pub fn yearly_income_after_tax(settings: &UserSettings) -> Decimal {
        settings.yearly_income * (Decimal::ONE - settings.tax_rate)
    }

    /// Monthly income after tax; this is the amount written on the system
    /// salary definition.
    #[must_use]
    pub fn monthly_income_after_tax(settings: &UserSettings) -> Decimal {
        Self::yearly_income_after_tax(settings) / Decimal::from(12_u32)
    }

    /// Computes the accumulated deduction and compensation for a set of
    /// absence records.
    ///
    /// Sick hours are deducted at the full hourly wage. Child-care hours
    /// are deducted at a wage derived from the yearly income capped at
    /// 410 000. Every record is compensated at a flat 80 % of its
    /// deduction.
    #[must_use]
    pub fn absence_effect(settings: &UserSettings, records: &[AbsenceRecord]) -> AbsenceEffect {
        let mut effect = AbsenceEffect::default();

        if settings.yearly_work_hours == 0 || records.is_empty() {
            return effect;
        }

        let hourly_wage = Self::hourly_wage(settings);
        let work_hours = Decimal::from(settings.yearly_work_hours);

        for record in records {
            let deduction = match record.absence_type {
                AbsenceType::ChildCare => {
                    let capped_yearly_income =
                        settings.yearly_income.min(child_care_income_cap());
                    let capped_hourly_wage = capped_yearly_income / work_hours;
                    capped_hourly_wage * record.hours
                }
                AbsenceType::Sick => hourly_wage * record.hours,
            };

            let compensation = deduction * compensation_rate();

            effect.total_deduction += deduction;
            effect.total_compensation += compensation;
        }

        effect
    }
}
