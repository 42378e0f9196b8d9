use crate::syntax::{Declaration, Selector, Stylesheet, expand_shorthands};
use crate::ua::ua_declarations;
use std::cmp::Ordering::Equal;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
enum Origin {
    UserAgent,
    Author,
    Inline,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
struct Specificity(u16, u16, u16); // (id, class, type)

struct Candidate {
    property: String,
    value: String,
    origin: Origin,
    specificity: Specificity,
    order: u32,
}

fn specificity_of(selector: &Selector) -> Specificity {
    match selector {
        Selector::Universal => Specificity(0, 0, 0),
        Selector::Type(_) => Specificity(0, 0, 1),
        Selector::Class(_) => Specificity(0, 1, 0),
        Selector::Id(_) => Specificity(1, 0, 0),
    }
}

fn get_attribute<'a>(attributes: &'a [(String, Option<String>)], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .and_then(|(_, v)| v.as_deref())
}

/// Check if an element matches a selector.
pub fn matches_selector(
    name: &str,
    attributes: &[(String, Option<String>)],
    selector: &Selector,
) -> bool {
    match selector {
        Selector::Universal => true,
        Selector::Type(t) => name.eq_ignore_ascii_case(t),
        Selector::Id(want) => get_attribute(attributes, "id").is_some_and(|v| v == want),
        Selector::Class(want) => get_attribute(attributes, "class")
            .is_some_and(|classlist| classlist.split_whitespace().any(|c| c == want)),
    }
}

/// Resolve the specified longhand declarations of one element.
///
/// Candidates come from the user-agent defaults for `name`, every matching
/// rule of `sheet` and the element's inline style, in increasing priority.
/// Within an origin, higher specificity wins, then later source order. The
/// result is sorted by property name.
pub fn cascade(
    name: &str,
    attributes: &[(String, Option<String>)],
    inline: &[Declaration],
    sheet: &Stylesheet,
) -> Vec<(String, String)> {
    let mut candidates: Vec<Candidate> = Vec::new();

    let ua: Vec<Declaration> = ua_declarations(name)
        .iter()
        .map(|(n, v)| Declaration::new(n, v))
        .collect();
    push_all(&mut candidates, &ua, Origin::UserAgent, Specificity::default(), 0);

    for (order, rule) in sheet.rules.iter().enumerate() {
        let mut matched_specificity: Option<Specificity> = None;
        for selector in &rule.selectors {
            if matches_selector(name, attributes, selector) {
                let specificity = specificity_of(selector);
                matched_specificity =
                    Some(matched_specificity.map_or(specificity, |cur| cur.max(specificity)));
            }
        }
        if let Some(specificity) = matched_specificity {
            push_all(
                &mut candidates,
                &rule.declarations,
                Origin::Author,
                specificity,
                order as u32,
            );
        }
    }

    push_all(
        &mut candidates,
        inline,
        Origin::Inline,
        Specificity::default(),
        0,
    );

    // stable sort keeps longhand expansion order for equal keys
    candidates.sort_by(|a, b| match a.property.cmp(&b.property) {
        Equal => match a.origin.cmp(&b.origin) {
            Equal => match a.specificity.cmp(&b.specificity) {
                Equal => a.order.cmp(&b.order),
                other => other,
            },
            other => other,
        },
        other => other,
    });

    let mut resolved = Vec::new();
    let mut i = 0;
    while i < candidates.len() {
        let candidate_property = &candidates[i].property;
        let mut j = i;
        while j + 1 < candidates.len() && candidates[j + 1].property == *candidate_property {
            j += 1;
        }
        let winner = &candidates[j];
        resolved.push((winner.property.clone(), winner.value.clone()));
        i = j + 1;
    }
    resolved
}

fn push_all(
    candidates: &mut Vec<Candidate>,
    decls: &[Declaration],
    origin: Origin,
    specificity: Specificity,
    order: u32,
) {
    candidates.extend(expand_shorthands(decls).into_iter().map(|d| Candidate {
        property: d.name,
        value: d.value,
        origin,
        specificity,
        order,
    }));
}
