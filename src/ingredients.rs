//! Turns free-text ingredient lines into structured records.
//!
//! Parsing is total: every input line yields exactly one [`IngredientLine`],
//! and the worst case is a line with only a `name`.

/// One parsed ingredient line
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientLine {
    pub quantity: Option<f64>,
    /// Canonical short unit, see [`canonical_unit`]
    pub unit: Option<String>,
    pub name: String,
}

/// Unit spellings mapped to their canonical short form
const UNIT_SYNONYMS: &[(&str, &str)] = &[
    ("tablespoons", "tbsp"),
    ("tablespoon", "tbsp"),
    ("tbsps", "tbsp"),
    ("tbsp", "tbsp"),
    ("tbs", "tbsp"),
    ("teaspoons", "tsp"),
    ("teaspoon", "tsp"),
    ("tsps", "tsp"),
    ("tsp", "tsp"),
    ("cups", "cup"),
    ("cup", "cup"),
    ("ounces", "oz"),
    ("ounce", "oz"),
    ("oz", "oz"),
    ("pounds", "pound"),
    ("pound", "pound"),
    ("lbs", "pound"),
    ("lb", "pound"),
    ("kilograms", "kg"),
    ("kilogram", "kg"),
    ("kg", "kg"),
    ("grams", "g"),
    ("gram", "g"),
    ("g", "g"),
];

/// Unicode vulgar fractions and their values
const FRACTION_GLYPHS: &[(char, f64)] = &[
    ('½', 1.0 / 2.0),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('¼', 1.0 / 4.0),
    ('¾', 3.0 / 4.0),
    ('⅕', 1.0 / 5.0),
    ('⅖', 2.0 / 5.0),
    ('⅗', 3.0 / 5.0),
    ('⅘', 4.0 / 5.0),
    ('⅙', 1.0 / 6.0),
    ('⅚', 5.0 / 6.0),
    ('⅛', 1.0 / 8.0),
    ('⅜', 3.0 / 8.0),
    ('⅝', 5.0 / 8.0),
    ('⅞', 7.0 / 8.0),
];

/// Parse every raw line, one entry per line, in order
pub fn parse_ingredients<S: AsRef<str>>(lines: &[S]) -> Vec<IngredientLine> {
    lines.iter().map(|line| parse_ingredient(line.as_ref())).collect()
}

/// Parse a single ingredient line
///
/// Parenthetical asides are dropped, a leading quantity (integer, decimal,
/// fraction, fraction glyph or mixed number) is consumed, then a known unit,
/// and whatever is left becomes the name with its original casing.
pub fn parse_ingredient(line: &str) -> IngredientLine {
    let cleaned = strip_parentheticals(line);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let (quantity, mut idx) = take_quantity(&tokens);

    let unit = tokens.get(idx).and_then(|token| canonical_unit(token));
    if unit.is_some() {
        idx += 1;
    }

    let name = tokens[idx..].join(" ");
    if name.is_empty() {
        // Nothing left to call the ingredient; keep the text instead
        let fallback = if tokens.is_empty() {
            // Whitespace-only lines keep their text so the name is never empty
            match line.trim() {
                "" => line.to_string(),
                trimmed => trimmed.to_string(),
            }
        } else {
            tokens.join(" ")
        };
        return IngredientLine {
            quantity: None,
            unit: None,
            name: fallback,
        };
    }

    IngredientLine {
        quantity,
        unit: unit.map(str::to_string),
        name,
    }
}

/// Look up the canonical short form of a unit token, case-insensitively
pub fn canonical_unit(token: &str) -> Option<&'static str> {
    let lowered = token.to_lowercase();
    let lowered = lowered.trim_end_matches(|c: char| c == '.' || c == ',');
    UNIT_SYNONYMS
        .iter()
        .find(|(spelling, _)| *spelling == lowered)
        .map(|(_, canonical)| *canonical)
}

/// Remove `( ... )` asides; an unclosed `(` is left as text
fn strip_parentheticals(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(open) = rest.find('(') {
        match rest[open..].find(')') {
            Some(close) => {
                out.push_str(&rest[..open]);
                out.push(' ');
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Returns the leading quantity and how many tokens it used
fn take_quantity(tokens: &[&str]) -> (Option<f64>, usize) {
    let Some(whole) = tokens.first().and_then(|t| parse_number(t)) else {
        return (None, 0);
    };

    // "1 1/2" or "1 ½"
    if is_integer(tokens[0]) {
        if let Some(part) = tokens
            .get(1)
            .filter(|t| is_fraction(t))
            .and_then(|t| parse_number(t))
        {
            return (Some(whole + part), 2);
        }
    }

    (Some(whole), 1)
}

fn parse_number(token: &str) -> Option<f64> {
    // "1-1/2"
    if let Some((whole, part)) = token.split_once('-') {
        if is_integer(whole) && is_fraction(part) {
            return Some(parse_plain(whole)? + parse_fraction(part)?);
        }
        return None;
    }

    if is_fraction(token) {
        return parse_fraction(token);
    }

    parse_plain(token)
}

fn parse_plain(token: &str) -> Option<f64> {
    let digits = token.chars().filter(|c| c.is_ascii_digit()).count();
    let dots = token.chars().filter(|c| *c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != token.chars().count() {
        return None;
    }
    token.parse().ok().filter(|value: &f64| value.is_finite())
}

fn parse_fraction(token: &str) -> Option<f64> {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return glyph_value(c);
    }

    // "1½"
    if let Some(last) = token.chars().last() {
        if let Some(part) = glyph_value(last) {
            let prefix = &token[..token.len() - last.len_utf8()];
            if !is_integer(prefix) {
                return None;
            }
            return parse_plain(prefix).map(|whole| whole + part);
        }
    }

    let (num, den) = token.split_once(|c: char| c == '/' || c == '\u{2044}')?;
    if !is_integer(num) || !is_integer(den) {
        return None;
    }
    let den = parse_plain(den)?;
    if den == 0.0 {
        return None;
    }
    Some(parse_plain(num)? / den)
}

fn glyph_value(c: char) -> Option<f64> {
    FRACTION_GLYPHS
        .iter()
        .find(|(glyph, _)| *glyph == c)
        .map(|(_, value)| *value)
}

fn is_integer(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

fn is_fraction(token: &str) -> bool {
    token.contains('/')
        || token.contains('\u{2044}')
        || token.chars().any(|c| glyph_value(c).is_some())
}
