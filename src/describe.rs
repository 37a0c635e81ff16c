//! English descriptions and canonical renderings of an expression.

use crate::expression::Expression;
use crate::field::{self, Field};
use crate::pattern::Pattern;

impl Expression {
    /// A human readable sentence, e.g. "midnight on the last day of every month".
    pub fn describe(&self) -> String {
        // a wildcard right after another wildcard adds nothing to the sentence
        let present: Vec<Option<&Pattern>> = Field::ALL
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let node = self.node(*field);
                if i > 0 && node.is_wildcard() && self.nodes()[i - 1].is_wildcard() {
                    None
                } else {
                    Some(node)
                }
            })
            .collect();

        let sub_day: Vec<(Field, &Pattern)> = Field::ALL[..3]
            .iter()
            .zip(&present[..3])
            .filter_map(|(field, node)| node.map(|node| (*field, node)))
            .collect();
        let clock = match sub_day.as_slice() {
            [(_, s), (_, m), (_, h)] => s.single().zip(m.single()).zip(h.single()),
            _ => None,
        };
        let time = match (sub_day.first(), clock) {
            (Some((field, first)), _) if sub_day.iter().all(|(_, node)| node.is_wildcard()) => {
                first.english(*field)
            }
            (_, Some(((second, minute), hour))) => field::format_time(second, minute, hour),
            _ => sub_day
                .iter()
                .filter(|(_, node)| node.single() != Some(0))
                .map(|(field, node)| node.english(*field))
                .collect::<Vec<_>>()
                .join(" of "),
        };

        let month = self.node(Field::Month).english(Field::Month);
        let mut rest = String::new();
        if let Some(dom) = present[Field::DayOfMonth.index()].filter(|node| !node.is_unspecified()) {
            if dom.single().is_some() {
                rest += "on ";
            }
            rest += &dom.english(Field::DayOfMonth);
            rest += " of ";
            rest += &month;
        }
        if let Some(dow) = present[Field::DayOfWeek.index()].filter(|node| !node.is_unspecified()) {
            if !rest.is_empty() {
                rest += " and ";
            }
            if dow.single().is_some() {
                rest += "every ";
            }
            rest += &dow.english(Field::DayOfWeek);
            rest += " of ";
            rest += &month;
        }
        let year = self.node(Field::Year);
        if !year.is_wildcard() {
            rest += " ";
            rest += &year.english(Field::Year);
        }

        if rest.is_empty() {
            time
        } else {
            format!("{time} {rest}")
        }
    }

    /// Seven canonical tokens, day of week numbered 1 = Monday .. 7 = Sunday.
    pub fn as_string(&self) -> String {
        self.nodes().iter().map(Pattern::token).collect::<Vec<_>>().join(" ")
    }

    /// Like [`Expression::as_string`] but with day of week numbered
    /// 1 = Sunday .. 7 = Saturday.
    pub fn as_quartz_string(&self) -> String {
        Field::ALL
            .iter()
            .map(|field| self.node(*field).alternate_token(*field))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn dump_tree(&self) -> String {
        let mut lines = Vec::new();
        for (i, field) in Field::ALL.iter().enumerate() {
            let last = i == Field::ALL.len() - 1;
            let branch = match i {
                0 => "┌─ ",
                _ if last => "└─ ",
                _ => "├─ ",
            };
            let node = self.node(*field);
            lines.push(format!("{branch}{}: {}", field.name(), node.label()));
            let indent = if last { "   " } else { "│  " };
            dump_children(node, indent, &mut lines);
        }
        lines.join("\n")
    }
}

fn dump_children(node: &Pattern, indent: &str, lines: &mut Vec<String>) {
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        let last = i == children.len() - 1;
        let branch = if last { "└─ " } else { "├─ " };
        lines.push(format!("{indent}{branch}{}", child.label()));
        let nested = format!("{indent}{}", if last { "   " } else { "│  " });
        dump_children(child, &nested, lines);
    }
}
