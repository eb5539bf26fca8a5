//! Static translation tables: accent combinations, named control symbols,
//! and math-mode substitutions.

/// Accent command letters that take an argument rather than being symbols
/// themselves. The single-character accents (`` ` `` `'` `^` `"` `~` `=`
/// `.`) are recognized directly by the scanner.
pub(crate) const WORD_ACCENTS: &[char] = &['u', 'v', 'H', 't', 'c', 'd', 'b', 'r', 'k'];

/// (accent, base letter) → precomposed codepoint.
const ACCENT_COMBINATIONS: &[(char, char, char)] = &[
    // grave
    ('`', 'a', 'à'),
    ('`', 'e', 'è'),
    ('`', 'i', 'ì'),
    ('`', 'o', 'ò'),
    ('`', 'u', 'ù'),
    ('`', 'A', 'À'),
    ('`', 'E', 'È'),
    ('`', 'I', 'Ì'),
    ('`', 'O', 'Ò'),
    ('`', 'U', 'Ù'),
    // acute
    ('\'', 'a', 'á'),
    ('\'', 'c', 'ć'),
    ('\'', 'e', 'é'),
    ('\'', 'i', 'í'),
    ('\'', 'l', 'ĺ'),
    ('\'', 'n', 'ń'),
    ('\'', 'o', 'ó'),
    ('\'', 'r', 'ŕ'),
    ('\'', 's', 'ś'),
    ('\'', 'u', 'ú'),
    ('\'', 'y', 'ý'),
    ('\'', 'z', 'ź'),
    ('\'', 'A', 'Á'),
    ('\'', 'C', 'Ć'),
    ('\'', 'E', 'É'),
    ('\'', 'I', 'Í'),
    ('\'', 'L', 'Ĺ'),
    ('\'', 'N', 'Ń'),
    ('\'', 'O', 'Ó'),
    ('\'', 'R', 'Ŕ'),
    ('\'', 'S', 'Ś'),
    ('\'', 'U', 'Ú'),
    ('\'', 'Y', 'Ý'),
    ('\'', 'Z', 'Ź'),
    // circumflex
    ('^', 'a', 'â'),
    ('^', 'c', 'ĉ'),
    ('^', 'e', 'ê'),
    ('^', 'g', 'ĝ'),
    ('^', 'h', 'ĥ'),
    ('^', 'i', 'î'),
    ('^', 'j', 'ĵ'),
    ('^', 'o', 'ô'),
    ('^', 's', 'ŝ'),
    ('^', 'u', 'û'),
    ('^', 'w', 'ŵ'),
    ('^', 'y', 'ŷ'),
    ('^', 'A', 'Â'),
    ('^', 'C', 'Ĉ'),
    ('^', 'E', 'Ê'),
    ('^', 'G', 'Ĝ'),
    ('^', 'H', 'Ĥ'),
    ('^', 'I', 'Î'),
    ('^', 'J', 'Ĵ'),
    ('^', 'O', 'Ô'),
    ('^', 'S', 'Ŝ'),
    ('^', 'U', 'Û'),
    ('^', 'W', 'Ŵ'),
    ('^', 'Y', 'Ŷ'),
    // diaeresis
    ('"', 'a', 'ä'),
    ('"', 'e', 'ë'),
    ('"', 'i', 'ï'),
    ('"', 'o', 'ö'),
    ('"', 'u', 'ü'),
    ('"', 'y', 'ÿ'),
    ('"', 'A', 'Ä'),
    ('"', 'E', 'Ë'),
    ('"', 'I', 'Ï'),
    ('"', 'O', 'Ö'),
    ('"', 'U', 'Ü'),
    ('"', 'Y', 'Ÿ'),
    // tilde
    ('~', 'a', 'ã'),
    ('~', 'i', 'ĩ'),
    ('~', 'n', 'ñ'),
    ('~', 'o', 'õ'),
    ('~', 'u', 'ũ'),
    ('~', 'A', 'Ã'),
    ('~', 'I', 'Ĩ'),
    ('~', 'N', 'Ñ'),
    ('~', 'O', 'Õ'),
    ('~', 'U', 'Ũ'),
    // macron
    ('=', 'a', 'ā'),
    ('=', 'e', 'ē'),
    ('=', 'i', 'ī'),
    ('=', 'o', 'ō'),
    ('=', 'u', 'ū'),
    ('=', 'A', 'Ā'),
    ('=', 'E', 'Ē'),
    ('=', 'I', 'Ī'),
    ('=', 'O', 'Ō'),
    ('=', 'U', 'Ū'),
    // dot above
    ('.', 'a', 'ȧ'),
    ('.', 'c', 'ċ'),
    ('.', 'e', 'ė'),
    ('.', 'g', 'ġ'),
    ('.', 'z', 'ż'),
    ('.', 'C', 'Ċ'),
    ('.', 'E', 'Ė'),
    ('.', 'G', 'Ġ'),
    ('.', 'I', 'İ'),
    ('.', 'Z', 'Ż'),
    // breve
    ('u', 'a', 'ă'),
    ('u', 'e', 'ĕ'),
    ('u', 'g', 'ğ'),
    ('u', 'i', 'ĭ'),
    ('u', 'o', 'ŏ'),
    ('u', 'u', 'ŭ'),
    ('u', 'A', 'Ă'),
    ('u', 'E', 'Ĕ'),
    ('u', 'G', 'Ğ'),
    ('u', 'I', 'Ĭ'),
    ('u', 'O', 'Ŏ'),
    ('u', 'U', 'Ŭ'),
    // caron
    ('v', 'c', 'č'),
    ('v', 'd', 'ď'),
    ('v', 'e', 'ě'),
    ('v', 'g', 'ǧ'),
    ('v', 'n', 'ň'),
    ('v', 'r', 'ř'),
    ('v', 's', 'š'),
    ('v', 't', 'ť'),
    ('v', 'z', 'ž'),
    ('v', 'C', 'Č'),
    ('v', 'D', 'Ď'),
    ('v', 'E', 'Ě'),
    ('v', 'G', 'Ǧ'),
    ('v', 'N', 'Ň'),
    ('v', 'R', 'Ř'),
    ('v', 'S', 'Š'),
    ('v', 'T', 'Ť'),
    ('v', 'Z', 'Ž'),
    // double acute
    ('H', 'o', 'ő'),
    ('H', 'u', 'ű'),
    ('H', 'O', 'Ő'),
    ('H', 'U', 'Ű'),
    // cedilla
    ('c', 'c', 'ç'),
    ('c', 'g', 'ģ'),
    ('c', 'k', 'ķ'),
    ('c', 'l', 'ļ'),
    ('c', 'n', 'ņ'),
    ('c', 'r', 'ŗ'),
    ('c', 's', 'ş'),
    ('c', 't', 'ţ'),
    ('c', 'C', 'Ç'),
    ('c', 'G', 'Ģ'),
    ('c', 'K', 'Ķ'),
    ('c', 'L', 'Ļ'),
    ('c', 'N', 'Ņ'),
    ('c', 'R', 'Ŗ'),
    ('c', 'S', 'Ş'),
    ('c', 'T', 'Ţ'),
    // ring
    ('r', 'a', 'å'),
    ('r', 'u', 'ů'),
    ('r', 'A', 'Å'),
    ('r', 'U', 'Ů'),
    // ogonek
    ('k', 'a', 'ą'),
    ('k', 'e', 'ę'),
    ('k', 'i', 'į'),
    ('k', 'u', 'ų'),
    ('k', 'A', 'Ą'),
    ('k', 'E', 'Ę'),
    ('k', 'I', 'Į'),
    ('k', 'U', 'Ų'),
];

/// Accents with no precomposed forms render as base + combining mark.
const COMBINING_ACCENTS: &[(char, char)] = &[
    ('d', '\u{0323}'), // dot below
    ('b', '\u{0331}'), // bar below
    ('t', '\u{0361}'), // tie
];

/// Named control symbols outside math mode.
pub(crate) const CONTROL_SYMBOLS: &[(&str, &str)] = &[
    ("oe", "œ"),
    ("OE", "Œ"),
    ("ae", "æ"),
    ("AE", "Æ"),
    ("aa", "å"),
    ("AA", "Å"),
    ("o", "ø"),
    ("O", "Ø"),
    ("l", "ł"),
    ("L", "Ł"),
    ("ss", "ß"),
    ("i", "ı"),
    ("j", "ȷ"),
    ("P", "¶"),
    ("S", "§"),
    ("dag", "†"),
    ("ddag", "‡"),
    ("pounds", "£"),
    ("copyright", "©"),
    ("dots", "…"),
    ("ldots", "…"),
];

/// Control words substituted inside `$ … $`.
pub(crate) const MATH_SYMBOLS: &[(&str, &str)] = &[
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "γ"),
    ("delta", "δ"),
    ("epsilon", "ε"),
    ("zeta", "ζ"),
    ("eta", "η"),
    ("theta", "θ"),
    ("iota", "ι"),
    ("kappa", "κ"),
    ("lambda", "λ"),
    ("mu", "μ"),
    ("nu", "ν"),
    ("xi", "ξ"),
    ("pi", "π"),
    ("rho", "ρ"),
    ("sigma", "σ"),
    ("tau", "τ"),
    ("upsilon", "υ"),
    ("phi", "φ"),
    ("chi", "χ"),
    ("psi", "ψ"),
    ("omega", "ω"),
    ("Gamma", "Γ"),
    ("Delta", "Δ"),
    ("Theta", "Θ"),
    ("Lambda", "Λ"),
    ("Xi", "Ξ"),
    ("Pi", "Π"),
    ("Sigma", "Σ"),
    ("Upsilon", "Υ"),
    ("Phi", "Φ"),
    ("Psi", "Ψ"),
    ("Omega", "Ω"),
    ("times", "×"),
    ("div", "÷"),
    ("pm", "±"),
    ("mp", "∓"),
    ("cdot", "·"),
    ("ast", "∗"),
    ("leq", "≤"),
    ("geq", "≥"),
    ("neq", "≠"),
    ("approx", "≈"),
    ("equiv", "≡"),
    ("sim", "∼"),
    ("propto", "∝"),
    ("ll", "≪"),
    ("gg", "≫"),
    ("in", "∈"),
    ("subset", "⊂"),
    ("supset", "⊃"),
    ("cup", "∪"),
    ("cap", "∩"),
    ("emptyset", "∅"),
    ("to", "→"),
    ("rightarrow", "→"),
    ("leftarrow", "←"),
    ("Rightarrow", "⇒"),
    ("Leftarrow", "⇐"),
    ("infty", "∞"),
    ("partial", "∂"),
    ("nabla", "∇"),
    ("forall", "∀"),
    ("exists", "∃"),
    ("sum", "∑"),
    ("prod", "∏"),
    ("int", "∫"),
    ("sqrt", "√"),
];

/// Resolve accent + base letter to its replacement, or `None` when the
/// combination is unknown.
pub(crate) fn compose_accent(accent: char, base: char) -> Option<String> {
    if let Some(&(_, _, composed)) = ACCENT_COMBINATIONS
        .iter()
        .find(|&&(a, b, _)| a == accent && b == base)
    {
        return Some(composed.to_string());
    }
    COMBINING_ACCENTS
        .iter()
        .find(|&&(a, _)| a == accent)
        .map(|&(_, mark)| {
            let mut s = String::with_capacity(base.len_utf8() + mark.len_utf8());
            s.push(base);
            s.push(mark);
            s
        })
}

/// Look up a name in one of the string tables.
pub(crate) fn lookup(
    table: &'static [(&'static str, &'static str)],
    name: &str,
) -> Option<&'static str> {
    table.iter().find(|&&(n, _)| n == name).map(|&(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_accent() {
        assert_eq!(compose_accent('"', 'o'), Some("ö".to_string()));
        assert_eq!(compose_accent('H', 'o'), Some("ő".to_string()));
        assert_eq!(compose_accent('v', 'S'), Some("Š".to_string()));
        assert_eq!(compose_accent('d', 'h'), Some("h\u{0323}".to_string()));
        assert_eq!(compose_accent('"', 'q'), None);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup(CONTROL_SYMBOLS, "ss"), Some("ß"));
        assert_eq!(lookup(CONTROL_SYMBOLS, "oe"), Some("œ"));
        assert_eq!(lookup(MATH_SYMBOLS, "alpha"), Some("α"));
        assert_eq!(lookup(CONTROL_SYMBOLS, "nosuch"), None);
    }
}
