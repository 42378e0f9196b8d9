// A single CSS property: "color: red"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

impl Declaration {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.trim().to_ascii_lowercase(),
            value: value.trim().to_string(),
        }
    }
}

// Set of selectors and declarations
#[derive(Clone, Debug)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Universal,
    Type(String),  // element/tag selector
    Id(String),    // #id selector
    Class(String), // .class selector
}

// A full stylesheet: multiple rules
#[derive(Clone, Debug, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    /// Append the rules of another sheet after this one's.
    pub fn extend(&mut self, other: Stylesheet) {
        self.rules.extend(other.rules);
    }
}

// input: "textarea, #notes { font-size: 12px; } .wide { width: 300px; }"
// output: Stylesheet { rules: vec![Rule{ selectors: ..., declarations: ...}, ...] }
pub fn parse_stylesheet(input: &str) -> Stylesheet {
    let mut rules = Vec::new();
    for block in input.split('}') {
        if let Some((selector_str, declaration_str)) = block.split_once('{') {
            let selectors = selector_str
                .split(',')
                .filter_map(parse_selector)
                .collect::<Vec<_>>();
            if selectors.is_empty() {
                continue;
            }
            let declarations = parse_declarations(declaration_str);
            if declarations.is_empty() {
                continue;
            }
            rules.push(Rule {
                selectors,
                declarations,
            });
        }
    }
    Stylesheet { rules }
}

// input: "font-size: 12px; padding: 2px 4px;"
// output: vec![Declaration { name: "font-size", value: "12px" }, Declaration { name: "padding", ... }]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = v.trim().to_string();
            Some(Declaration { name, value })
        })
        .collect()
}

/// Inverse of [`parse_declarations`], as used for a `style` attribute.
pub fn serialize_declarations(decls: &[Declaration]) -> String {
    let mut out = String::new();
    for (i, d) in decls.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&d.name);
        out.push_str(": ");
        out.push_str(&d.value);
        out.push(';');
    }
    out
}

/// Split shorthands into the longhands the computed style understands.
///
/// `word-wrap` is the legacy alias of `overflow-wrap`. Unknown properties pass
/// through untouched.
pub fn expand_shorthands(decls: &[Declaration]) -> Vec<Declaration> {
    let mut out = Vec::with_capacity(decls.len());
    for d in decls {
        match d.name.as_str() {
            "padding" => expand_edges(&mut out, "padding-", "", &d.value),
            "border-width" => expand_edges(&mut out, "border-", "-width", &d.value),
            "border-style" => expand_edges(&mut out, "border-", "-style", &d.value),
            "border" => expand_border(&mut out, &d.value),
            "overflow" => {
                let mut parts = d.value.split_whitespace();
                if let Some(x) = parts.next() {
                    let y = parts.next().unwrap_or(x);
                    out.push(Declaration::new("overflow-x", x));
                    out.push(Declaration::new("overflow-y", y));
                }
            }
            "word-wrap" => out.push(Declaration::new("overflow-wrap", &d.value)),
            _ => out.push(d.clone()),
        }
    }
    out
}

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

fn expand_edges(out: &mut Vec<Declaration>, prefix: &str, suffix: &str, value: &str) {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let [top, right, bottom, left] = match parts.as_slice() {
        [a] => [*a, *a, *a, *a],
        [a, b] => [*a, *b, *a, *b],
        [a, b, c] => [*a, *b, *c, *b],
        [a, b, c, d] => [*a, *b, *c, *d],
        _ => return,
    };
    for (side, v) in SIDES.into_iter().zip([top, right, bottom, left]) {
        out.push(Declaration::new(&format!("{prefix}{side}{suffix}"), v));
    }
}

// "border: 1px solid #ccc" -> width + style per side; color is ignored
fn expand_border(out: &mut Vec<Declaration>, value: &str) {
    let mut width = None;
    let mut style = None;
    for part in value.split_whitespace() {
        if crate::values::parse_border_width(part).is_some() {
            width = Some(part);
        } else if crate::values::parse_border_style(part).is_some() {
            style = Some(part);
        }
    }
    for side in SIDES {
        out.push(Declaration::new(
            &format!("border-{side}-width"),
            width.unwrap_or("medium"),
        ));
        out.push(Declaration::new(
            &format!("border-{side}-style"),
            style.unwrap_or("none"),
        ));
    }
}

// input: "#id", ".class", "div", "*"
// output: Some(Selector::Id("id)), ...
pub fn parse_selector(s: &str) -> Option<Selector> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s == "*" {
        return Some(Selector::Universal);
    }
    if let Some(id) = s.strip_prefix('#') {
        return Some(Selector::Id(id.trim().to_string()));
    }
    if let Some(class) = s.strip_prefix('.') {
        return Some(Selector::Class(class.trim().to_string()));
    }
    if s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Some(Selector::Type(s.to_ascii_lowercase()));
    }
    None
}
