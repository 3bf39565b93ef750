//! Current value resolution: Override → (Additive, Multiplicative) → Custom

use crate::modifier::{ModifierKind, StatModifier};

/// Compute the current value of a stat from its base value and modifiers.
///
/// - If any override exists, the one with the greatest priority wins
///   (earliest inserted on ties) and nothing else is applied, custom
///   modifiers included.
/// - Otherwise: `(base + Σadditive) × (1 + Σmultiplicative)`, then every
///   custom function in list order as `f(base, running)`.
pub fn resolve_current_value(base_value: f64, modifiers: &[StatModifier]) -> f64 {
    if modifiers.is_empty() {
        return base_value;
    }

    if let Some(winner) = winning_override(modifiers) {
        return winner.magnitude();
    }

    let additive = sum_of(modifiers, ModifierKind::Additive);
    let multiplicative = sum_of(modifiers, ModifierKind::Multiplicative);

    let mut current = base_value + additive;
    current += current * multiplicative;

    modifiers
        .iter()
        .filter_map(StatModifier::custom_fn)
        .fold(current, |value, f| f(base_value, value))
}

/// Highest-priority override; a later modifier only wins with a strictly greater priority
pub fn winning_override(modifiers: &[StatModifier]) -> Option<&StatModifier> {
    modifiers
        .iter()
        .filter(|m| m.kind() == ModifierKind::Override)
        .fold(None, |best: Option<&StatModifier>, m| match best {
            Some(b) if b.priority() >= m.priority() => Some(b),
            _ => Some(m),
        })
}

fn sum_of(modifiers: &[StatModifier], kind: ModifierKind) -> f64 {
    modifiers
        .iter()
        .filter(|m| m.kind() == kind)
        .map(StatModifier::magnitude)
        .sum()
}
