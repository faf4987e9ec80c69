//! Decision advisor
//!
//! Two channels feed the decision log each time the advisor runs:
//! - threshold rules over the current fleet state (first match wins)
//! - an independent random filler drawn from a small catalog
//!
//! Both may fire on the same invocation; the rule entry is recorded first.

use rand::Rng;

use crate::core::config::AdvisorConfig;
use crate::core::types::Tick;
use crate::fleet::state::FleetState;
use crate::simulation::decision_log::{Decision, DecisionLog, DecisionLogEntry, Impact};

pub const REALLOCATE_TO_DEMAND: Decision = Decision {
    action: "Reallocate vehicles to high-demand areas",
    reason: "High demand detected with low availability",
    impact: Impact::Positive,
};

pub const REROUTE_AROUND_CONGESTION: Decision = Decision {
    action: "Reroute vehicles to avoid congestion",
    reason: "Traffic congestion affecting multiple areas",
    impact: Impact::Positive,
};

pub const OPTIMIZE_DISTRIBUTION: Decision = Decision {
    action: "Optimize vehicle distribution",
    reason: "Excess vehicle availability detected",
    impact: Impact::Neutral,
};

pub const FILLER_DECISIONS: [Decision; 3] = [
    Decision {
        action: "Adjusted fleet coverage based on weather",
        reason: "Weather conditions optimal for increased service",
        impact: Impact::Positive,
    },
    Decision {
        action: "Fuel optimization protocol activated",
        reason: "Multiple vehicles approaching low fuel threshold",
        impact: Impact::Neutral,
    },
    Decision {
        action: "Predictive demand analysis updated",
        reason: "Historical patterns indicate peak demand incoming",
        impact: Impact::Positive,
    },
];

/// Threshold rules, evaluated in precedence order
pub fn evaluate_rules(state: &FleetState, config: &AdvisorConfig) -> Option<Decision> {
    let available = state.available_count();

    if state.high_demand_zone_count() > config.high_zone_threshold
        && available < config.low_availability_threshold
    {
        return Some(REALLOCATE_TO_DEMAND);
    }

    if state.high_congestion_count() > config.congestion_threshold {
        return Some(REROUTE_AROUND_CONGESTION);
    }

    if available as f64 > state.fleet_size() as f64 * config.excess_availability_ratio {
        return Some(OPTIMIZE_DISTRIBUTION);
    }

    None
}

/// Filler channel: with probability `chance`, one catalog entry at random
pub fn draw_filler<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> Option<Decision> {
    if rng.gen::<f64>() < chance {
        Some(FILLER_DECISIONS[rng.gen_range(0..FILLER_DECISIONS.len())])
    } else {
        None
    }
}

/// Run both channels and record whatever fires. Returns the new entries,
/// in the order they were recorded.
pub fn advise<R: Rng + ?Sized>(
    state: &FleetState,
    rng: &mut R,
    config: &AdvisorConfig,
    log: &mut DecisionLog,
    tick: Tick,
    time: &str,
) -> Vec<DecisionLogEntry> {
    let mut recorded = Vec::new();

    if let Some(decision) = evaluate_rules(state, config) {
        tracing::debug!(tick, action = decision.action, "Rule-based decision");
        recorded.push(log.record(&decision, tick, time).clone());
    }

    if let Some(decision) = draw_filler(rng, config.filler_chance) {
        tracing::debug!(tick, action = decision.action, "Filler decision");
        recorded.push(log.record(&decision, tick, time).clone());
    }

    recorded
}
