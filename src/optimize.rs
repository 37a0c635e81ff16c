//! Third compilation stage: canonicalize a freshly built pattern.

use chrono::NaiveDateTime;

use crate::field::Field;
use crate::pattern::Pattern;

/// Optimize a root pattern for `field`.
///
/// Contiguous lists of numbers become ranges, steps collapse to simpler forms
/// when they select at most one value, and on the day of week field any
/// remaining zero is rewritten as Sunday (7).
pub fn optimize(field: Field, pattern: Pattern) -> Pattern {
    let optimized = simplify(field, pattern);
    if field == Field::DayOfWeek {
        sunday_as_seven(optimized)
    } else {
        optimized
    }
}

fn simplify(field: Field, pattern: Pattern) -> Pattern {
    match pattern {
        Pattern::List(children) => {
            let children: Vec<Pattern> =
                children.into_iter().map(|child| simplify(field, child)).collect();
            let mut values: Option<Vec<u32>> = children.iter().map(Pattern::single).collect();
            match values.as_mut() {
                Some(values) if values.len() >= 2 => {
                    values.sort_unstable();
                    // repeated values must not widen the run
                    values.dedup();
                    let (low, high) = (values[0], values[values.len() - 1]);
                    if low == high {
                        return Pattern::Single(low);
                    }
                    if (high - low) as usize == values.len() - 1 {
                        return Pattern::Range { low, high, wrapped: false };
                    }
                    Pattern::List(children)
                }
                _ => Pattern::List(children),
            }
        }
        Pattern::Step { base, step } => match step_values(field, &base, step).as_slice() {
            [] => Pattern::Wildcard,
            [only] => Pattern::Single(*only),
            _ => {
                let optimized = simplify(field, (*base).clone());
                if optimized != *base {
                    Pattern::Step { base: Box::new(optimized), step }
                } else {
                    Pattern::Step { base, step }
                }
            }
        },
        other => other,
    }
}

/// The values a step pattern selects from the field's static domain, or from
/// its base range when it has one.
fn step_values(field: Field, base: &Pattern, step: u32) -> Vec<u32> {
    let (min, max) = match base {
        Pattern::Range { low, high, .. } => (*low, *high),
        _ => field.limits(),
    };
    let stepped = Pattern::Step { base: Box::new(base.clone()), step };
    // steps over numbers, ranges and wildcards never look at the date
    let anchor = NaiveDateTime::default();
    (min..=max).filter(|v| stepped.matches(*v, &anchor)).collect()
}

fn sunday_as_seven(pattern: Pattern) -> Pattern {
    match pattern {
        Pattern::Single(0) => Pattern::Single(7),
        Pattern::List(children) => Pattern::List(children.into_iter().map(sunday_as_seven).collect()),
        Pattern::Step { base, step } => Pattern::Step { base: Box::new(sunday_as_seven(*base)), step },
        other => other,
    }
}
