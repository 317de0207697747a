//! Hazard model: closed catalogues of multiplicative risk factors and the
//! composition function that folds them into a combined hazard value.
//!
//! Every factor is a variant of a tagged enum, so an unknown factor name is
//! unrepresentable. Applicability is decided purely from the structured
//! [`RequestContext`]; the engine never re-derives risk from free text.

use serde::{Deserialize, Serialize};

use super::domain::{RequestContext, Severity, Trade};

/// Base hazard per severity tier, strictly increasing with rank.
pub const fn base_hazard(severity: Severity) -> f64 {
    match severity {
        Severity::Low => 0.111,
        Severity::Medium => 0.429,
        Severity::High => 1.500,
        Severity::Emergency => 5.667,
    }
}

/// Grouping used by interaction triggers and audit output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactorCategory {
    LifeSafety,
    ActiveDamage,
    Vulnerability,
    Environmental,
    Timing,
    Recurrence,
    PropertyRisk,
    EssentialService,
}

/// Named risk condition with a multiplicative hazard ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardFactor {
    GasLeak,
    FireSmoke,
    CarbonMonoxide,
    ElectricalShock,
    Sewage,
    WaterSpreading,
    CeilingDrip,
    SituationWorsening,
    TenantEvacuated,
    MedicalCondition,
    InfantPresent,
    ElderlyTenant,
    PregnantOccupant,
    ExtremeColdNoHeat,
    ColdNoHeat,
    ExtremeHeatNoAc,
    FreezeRisk,
    LateNight,
    Holiday,
    AfterHours,
    Weekend,
    ThirdOccurrence,
    RepairFailed,
    RecentIssue,
    StructuralConcern,
    UpperFloorLeak,
    MultiUnitBuilding,
    LockedOut,
    NoPower,
    NoWater,
    NoToilet,
}

impl HazardFactor {
    /// Fixed evaluation order; also the order factors appear in the trace.
    pub const ALL: [HazardFactor; 31] = [
        HazardFactor::GasLeak,
        HazardFactor::FireSmoke,
        HazardFactor::CarbonMonoxide,
        HazardFactor::ElectricalShock,
        HazardFactor::Sewage,
        HazardFactor::WaterSpreading,
        HazardFactor::CeilingDrip,
        HazardFactor::SituationWorsening,
        HazardFactor::TenantEvacuated,
        HazardFactor::MedicalCondition,
        HazardFactor::InfantPresent,
        HazardFactor::ElderlyTenant,
        HazardFactor::PregnantOccupant,
        HazardFactor::ExtremeColdNoHeat,
        HazardFactor::ColdNoHeat,
        HazardFactor::ExtremeHeatNoAc,
        HazardFactor::FreezeRisk,
        HazardFactor::LateNight,
        HazardFactor::Holiday,
        HazardFactor::AfterHours,
        HazardFactor::Weekend,
        HazardFactor::ThirdOccurrence,
        HazardFactor::RepairFailed,
        HazardFactor::RecentIssue,
        HazardFactor::StructuralConcern,
        HazardFactor::UpperFloorLeak,
        HazardFactor::MultiUnitBuilding,
        HazardFactor::LockedOut,
        HazardFactor::NoPower,
        HazardFactor::NoWater,
        HazardFactor::NoToilet,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            HazardFactor::GasLeak => "gas_leak",
            HazardFactor::FireSmoke => "fire_smoke",
            HazardFactor::CarbonMonoxide => "carbon_monoxide",
            HazardFactor::ElectricalShock => "electrical_shock",
            HazardFactor::Sewage => "sewage",
            HazardFactor::WaterSpreading => "water_spreading",
            HazardFactor::CeilingDrip => "ceiling_drip",
            HazardFactor::SituationWorsening => "situation_worsening",
            HazardFactor::TenantEvacuated => "tenant_evacuated",
            HazardFactor::MedicalCondition => "medical_condition",
            HazardFactor::InfantPresent => "infant_present",
            HazardFactor::ElderlyTenant => "elderly_tenant",
            HazardFactor::PregnantOccupant => "pregnant_occupant",
            HazardFactor::ExtremeColdNoHeat => "extreme_cold_no_heat",
            HazardFactor::ColdNoHeat => "cold_no_heat",
            HazardFactor::ExtremeHeatNoAc => "extreme_heat_no_ac",
            HazardFactor::FreezeRisk => "freeze_risk",
            HazardFactor::LateNight => "late_night",
            HazardFactor::Holiday => "holiday",
            HazardFactor::AfterHours => "after_hours",
            HazardFactor::Weekend => "weekend",
            HazardFactor::ThirdOccurrence => "third_occurrence",
            HazardFactor::RepairFailed => "repair_failed",
            HazardFactor::RecentIssue => "recent_issue",
            HazardFactor::StructuralConcern => "structural_concern",
            HazardFactor::UpperFloorLeak => "upper_floor_leak",
            HazardFactor::MultiUnitBuilding => "multi_unit_building",
            HazardFactor::LockedOut => "locked_out",
            HazardFactor::NoPower => "no_power",
            HazardFactor::NoWater => "no_water",
            HazardFactor::NoToilet => "no_toilet",
        }
    }

    pub const fn ratio(self) -> f64 {
        match self {
            HazardFactor::GasLeak | HazardFactor::FireSmoke | HazardFactor::CarbonMonoxide => 4.0,
            HazardFactor::ElectricalShock => 3.0,
            HazardFactor::Sewage => 2.5,
            HazardFactor::WaterSpreading | HazardFactor::ExtremeColdNoHeat => 2.2,
            HazardFactor::CeilingDrip
            | HazardFactor::MedicalCondition
            | HazardFactor::ExtremeHeatNoAc
            | HazardFactor::NoWater => 1.8,
            HazardFactor::SituationWorsening
            | HazardFactor::InfantPresent
            | HazardFactor::ColdNoHeat
            | HazardFactor::StructuralConcern => 1.6,
            HazardFactor::TenantEvacuated
            | HazardFactor::ThirdOccurrence
            | HazardFactor::LockedOut => 2.0,
            HazardFactor::ElderlyTenant
            | HazardFactor::RecentIssue
            | HazardFactor::UpperFloorLeak => 1.5,
            HazardFactor::PregnantOccupant | HazardFactor::MultiUnitBuilding => 1.4,
            HazardFactor::FreezeRisk | HazardFactor::RepairFailed | HazardFactor::NoToilet => 1.7,
            HazardFactor::LateNight => 1.35,
            HazardFactor::Holiday => 1.30,
            HazardFactor::AfterHours => 1.25,
            HazardFactor::Weekend => 1.15,
            HazardFactor::NoPower => 1.9,
        }
    }

    pub const fn category(self) -> FactorCategory {
        match self {
            HazardFactor::GasLeak
            | HazardFactor::FireSmoke
            | HazardFactor::CarbonMonoxide
            | HazardFactor::ElectricalShock
            | HazardFactor::Sewage => FactorCategory::LifeSafety,
            HazardFactor::WaterSpreading
            | HazardFactor::CeilingDrip
            | HazardFactor::SituationWorsening
            | HazardFactor::TenantEvacuated => FactorCategory::ActiveDamage,
            HazardFactor::MedicalCondition
            | HazardFactor::InfantPresent
            | HazardFactor::ElderlyTenant
            | HazardFactor::PregnantOccupant => FactorCategory::Vulnerability,
            HazardFactor::ExtremeColdNoHeat
            | HazardFactor::ColdNoHeat
            | HazardFactor::ExtremeHeatNoAc
            | HazardFactor::FreezeRisk => FactorCategory::Environmental,
            HazardFactor::LateNight
            | HazardFactor::Holiday
            | HazardFactor::AfterHours
            | HazardFactor::Weekend => FactorCategory::Timing,
            HazardFactor::ThirdOccurrence
            | HazardFactor::RepairFailed
            | HazardFactor::RecentIssue => FactorCategory::Recurrence,
            HazardFactor::StructuralConcern
            | HazardFactor::UpperFloorLeak
            | HazardFactor::MultiUnitBuilding => FactorCategory::PropertyRisk,
            HazardFactor::LockedOut
            | HazardFactor::NoPower
            | HazardFactor::NoWater
            | HazardFactor::NoToilet => FactorCategory::EssentialService,
        }
    }

    /// Whether this factor applies to the request. Timing and recurrence
    /// groups are mutually exclusive: only the most specific variant fires.
    fn applies(self, trade: &Trade, context: &RequestContext) -> bool {
        let hazards = &context.hazards;
        let timing = &context.timing;
        let history = &context.history;
        let temp = context.weather.outdoor_temp_f;
        let heating_issue = trade.matches("HVAC") || hazards.no_heat;
        let cooling_issue = trade.matches("HVAC") || hazards.no_ac;
        let water_issue = trade.matches("PLUMBING");

        match self {
            HazardFactor::GasLeak => hazards.gas_leak,
            HazardFactor::FireSmoke => hazards.fire_smoke,
            HazardFactor::CarbonMonoxide => hazards.carbon_monoxide,
            HazardFactor::ElectricalShock => hazards.electrical_shock,
            HazardFactor::Sewage => hazards.sewage,
            HazardFactor::WaterSpreading => hazards.water_spreading,
            HazardFactor::CeilingDrip => hazards.ceiling_drip,
            HazardFactor::SituationWorsening => hazards.getting_worse,
            HazardFactor::TenantEvacuated => hazards.tenant_evacuated,
            HazardFactor::MedicalCondition => context.tenant.has_medical_condition,
            HazardFactor::InfantPresent => context.tenant.has_infant,
            HazardFactor::ElderlyTenant => context.tenant.is_elderly,
            HazardFactor::PregnantOccupant => context.tenant.is_pregnant,
            HazardFactor::ExtremeColdNoHeat => temp < 40.0 && heating_issue,
            HazardFactor::ColdNoHeat => (40.0..50.0).contains(&temp) && heating_issue,
            HazardFactor::ExtremeHeatNoAc => temp > 95.0 && cooling_issue,
            HazardFactor::FreezeRisk => temp < 32.0 && water_issue,
            HazardFactor::LateNight => timing.is_late_night,
            HazardFactor::Holiday => timing.is_holiday && !timing.is_late_night,
            HazardFactor::AfterHours => {
                timing.is_after_hours && !timing.is_late_night && !timing.is_holiday
            }
            HazardFactor::Weekend => {
                timing.is_weekend
                    && !timing.is_late_night
                    && !timing.is_holiday
                    && !timing.is_after_hours
            }
            HazardFactor::ThirdOccurrence => history.recent_issues_count >= 3,
            HazardFactor::RepairFailed => {
                history.previous_repair_failed && history.recent_issues_count < 3
            }
            HazardFactor::RecentIssue => {
                (1..3).contains(&history.recent_issues_count) && !history.previous_repair_failed
            }
            HazardFactor::StructuralConcern => hazards.structural_concern,
            HazardFactor::UpperFloorLeak => {
                context.property.floor.map_or(false, |floor| floor > 1) && water_issue
            }
            HazardFactor::MultiUnitBuilding => context.property.total_units > 1,
            HazardFactor::LockedOut => hazards.locked_out,
            HazardFactor::NoPower => hazards.no_power,
            HazardFactor::NoWater => hazards.no_water,
            HazardFactor::NoToilet => hazards.no_toilet,
        }
    }

    fn reason(self, context: &RequestContext) -> String {
        match self {
            HazardFactor::GasLeak => "gas reported, immediate life safety risk".to_string(),
            HazardFactor::FireSmoke => "fire or smoke reported, immediate danger".to_string(),
            HazardFactor::CarbonMonoxide => "CO detected, life threatening".to_string(),
            HazardFactor::ElectricalShock => "active electrical danger present".to_string(),
            HazardFactor::Sewage => "sewage exposure in living area".to_string(),
            HazardFactor::WaterSpreading => "water damage actively occurring".to_string(),
            HazardFactor::CeilingDrip => "water penetrating from above".to_string(),
            HazardFactor::SituationWorsening => "problem actively getting worse".to_string(),
            HazardFactor::TenantEvacuated => "tenant forced to leave the unit".to_string(),
            HazardFactor::MedicalCondition => {
                "tenant has a medical condition requiring consideration".to_string()
            }
            HazardFactor::InfantPresent => "infant in household".to_string(),
            HazardFactor::ElderlyTenant => "elderly occupant".to_string(),
            HazardFactor::PregnantOccupant => "pregnant occupant".to_string(),
            HazardFactor::ExtremeColdNoHeat => format!(
                "heating issue with outdoor temp {:.0}F (extreme cold)",
                context.weather.outdoor_temp_f
            ),
            HazardFactor::ColdNoHeat => format!(
                "heating issue with outdoor temp {:.0}F (cold)",
                context.weather.outdoor_temp_f
            ),
            HazardFactor::ExtremeHeatNoAc => format!(
                "cooling issue with outdoor temp {:.0}F (extreme heat)",
                context.weather.outdoor_temp_f
            ),
            HazardFactor::FreezeRisk => format!(
                "water/pipe issue with outdoor temp {:.0}F (freeze risk)",
                context.weather.outdoor_temp_f
            ),
            HazardFactor::LateNight => "submitted during late night hours".to_string(),
            HazardFactor::Holiday => "submitted on a holiday".to_string(),
            HazardFactor::AfterHours => "submitted outside business hours".to_string(),
            HazardFactor::Weekend => "submitted on a weekend".to_string(),
            HazardFactor::ThirdOccurrence => format!(
                "issue reported {} times, recurring problem",
                context.history.recent_issues_count
            ),
            HazardFactor::RepairFailed => {
                "prior repair attempt did not resolve the issue".to_string()
            }
            HazardFactor::RecentIssue => "similar issue reported recently".to_string(),
            HazardFactor::StructuralConcern => {
                "potential structural integrity issue".to_string()
            }
            HazardFactor::UpperFloorLeak => format!(
                "water issue on floor {}, affects units below",
                context.property.floor.unwrap_or(0)
            ),
            HazardFactor::MultiUnitBuilding => format!(
                "issue in a {}-unit building, cascade risk",
                context.property.total_units
            ),
            HazardFactor::LockedOut => "tenant unable to safely access the unit".to_string(),
            HazardFactor::NoPower => "complete power loss to the unit".to_string(),
            HazardFactor::NoWater => "complete water loss".to_string(),
            HazardFactor::NoToilet => "no working toilet in the unit".to_string(),
        }
    }
}

/// Compound effect that fires only when all of its trigger conditions hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionFactor {
    VulnerabilityEnvironmental,
    WaterElectrical,
    RecurrenceHighSeverity,
    MultiUnitSpreading,
    LateNightEmergency,
    MultipleVulnerabilities,
}

impl InteractionFactor {
    pub const ALL: [InteractionFactor; 6] = [
        InteractionFactor::VulnerabilityEnvironmental,
        InteractionFactor::WaterElectrical,
        InteractionFactor::RecurrenceHighSeverity,
        InteractionFactor::MultiUnitSpreading,
        InteractionFactor::LateNightEmergency,
        InteractionFactor::MultipleVulnerabilities,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            InteractionFactor::VulnerabilityEnvironmental => "vulnerability_environmental",
            InteractionFactor::WaterElectrical => "water_electrical",
            InteractionFactor::RecurrenceHighSeverity => "recurrence_high_severity",
            InteractionFactor::MultiUnitSpreading => "multi_unit_spreading",
            InteractionFactor::LateNightEmergency => "late_night_emergency",
            InteractionFactor::MultipleVulnerabilities => "multiple_vulnerabilities",
        }
    }

    pub const fn ratio(self) -> f64 {
        match self {
            InteractionFactor::VulnerabilityEnvironmental
            | InteractionFactor::MultiUnitSpreading => 1.5,
            InteractionFactor::WaterElectrical => 1.6,
            InteractionFactor::RecurrenceHighSeverity => 1.4,
            InteractionFactor::LateNightEmergency => 1.25,
            InteractionFactor::MultipleVulnerabilities => 1.3,
        }
    }

    fn applies(
        self,
        severity: Severity,
        trade: &Trade,
        applied: &[AppliedFactor],
        context: &RequestContext,
    ) -> bool {
        let has_category = |category: FactorCategory| {
            applied.iter().any(|entry| entry.factor.category() == category)
        };
        let has_factor =
            |factor: HazardFactor| applied.iter().any(|entry| entry.factor == factor);

        match self {
            InteractionFactor::VulnerabilityEnvironmental => {
                has_category(FactorCategory::Vulnerability)
                    && has_category(FactorCategory::Environmental)
            }
            InteractionFactor::WaterElectrical => {
                let water = has_factor(HazardFactor::WaterSpreading)
                    || has_factor(HazardFactor::CeilingDrip)
                    || has_factor(HazardFactor::NoWater);
                let electrical =
                    trade.matches("ELECTRICAL") || has_factor(HazardFactor::ElectricalShock);
                water && electrical
            }
            InteractionFactor::RecurrenceHighSeverity => {
                has_category(FactorCategory::Recurrence) && severity >= Severity::High
            }
            InteractionFactor::MultiUnitSpreading => {
                context.property.total_units > 1
                    && (has_factor(HazardFactor::WaterSpreading)
                        || has_factor(HazardFactor::SituationWorsening))
            }
            InteractionFactor::LateNightEmergency => {
                context.timing.is_late_night && severity == Severity::Emergency
            }
            InteractionFactor::MultipleVulnerabilities => {
                applied
                    .iter()
                    .filter(|entry| entry.factor.category() == FactorCategory::Vulnerability)
                    .count()
                    >= 2
            }
        }
    }

    fn trigger(self, severity: Severity, applied: &[AppliedFactor]) -> String {
        match self {
            InteractionFactor::VulnerabilityEnvironmental => {
                "vulnerable tenant + extreme weather condition".to_string()
            }
            InteractionFactor::WaterElectrical => {
                "water issue near electrical systems".to_string()
            }
            InteractionFactor::RecurrenceHighSeverity => {
                format!("recurring issue with {} severity", severity.label())
            }
            InteractionFactor::MultiUnitSpreading => {
                "spreading issue in a multi-unit building".to_string()
            }
            InteractionFactor::LateNightEmergency => {
                "emergency during late night hours".to_string()
            }
            InteractionFactor::MultipleVulnerabilities => {
                let count = applied
                    .iter()
                    .filter(|entry| entry.factor.category() == FactorCategory::Vulnerability)
                    .count();
                format!("{count} vulnerability factors present")
            }
        }
    }
}

/// One factor that contributed to the combined hazard, with its audit note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedFactor {
    pub factor: HazardFactor,
    pub ratio: f64,
    pub reason: String,
}

/// One interaction that contributed, with the conjunction that fired it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedInteraction {
    pub interaction: InteractionFactor,
    pub ratio: f64,
    pub trigger: String,
}

/// Composition output: everything the priority scorer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardBreakdown {
    pub base_hazard: f64,
    pub combined_hazard: f64,
    pub factors: Vec<AppliedFactor>,
    pub interactions: Vec<AppliedInteraction>,
}

/// Evaluate every catalogue entry against the context and multiply the
/// applicable ratios into `base × Π(HR) × Π(IR)`. Multiplication commutes;
/// the returned sequences preserve evaluation order for the trace.
pub fn compose(severity: Severity, trade: &Trade, context: &RequestContext) -> HazardBreakdown {
    let base = base_hazard(severity);
    let mut combined = base;

    let mut factors = Vec::new();
    for factor in HazardFactor::ALL {
        if factor.applies(trade, context) {
            combined *= factor.ratio();
            factors.push(AppliedFactor {
                factor,
                ratio: factor.ratio(),
                reason: factor.reason(context),
            });
        }
    }

    let mut interactions = Vec::new();
    for interaction in InteractionFactor::ALL {
        if interaction.applies(severity, trade, &factors, context) {
            combined *= interaction.ratio();
            interactions.push(AppliedInteraction {
                interaction,
                ratio: interaction.ratio(),
                trigger: interaction.trigger(severity, &factors),
            });
        }
    }

    HazardBreakdown {
        base_hazard: base,
        combined_hazard: combined,
        factors,
        interactions,
    }
}
