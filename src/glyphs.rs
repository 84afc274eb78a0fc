//! Ordered glyph folding for Persian text.
//!
//! Arabic-script text from social media mixes presentation forms, regional
//! letter variants and Arabic code points that render like their Persian
//! counterparts. [`PERSIAN_RULES`] folds each family onto one modern Persian
//! letter. The table is applied rule by rule, in order: a code point listed in
//! two families is taken by the first one.

/// One family of equivalent code points and the letter they fold onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquivalenceRule {
    pub sources: &'static [char],
    pub canonical: char,
}

impl EquivalenceRule {
    #[inline]
    pub fn matches(&self, c: char) -> bool {
        self.sources.contains(&c)
    }
}

#[rustfmt::skip]
pub static PERSIAN_RULES: &[EquivalenceRule] = &[
    EquivalenceRule {
        sources: &[
            '\u{0672}', // Alef With Wavy Hamza Above
            '\u{0671}', // Alef Wasla
            '\u{0625}', // Alef With Hamza Below
            '\u{FE8D}', // Alef Isolated Form
            '\u{0623}', // Alef With Hamza Above
        ],
        canonical: '\u{0627}', // Alef
    },
    EquivalenceRule {
        sources: &[
            '\u{FE81}', // Alef With Madda Above Isolated Form
            '\u{0622}', // Alef With Madda Above
        ],
        canonical: '\u{0627}', // Alef
    },
    EquivalenceRule {
        sources: &[
            '\u{FE90}', // Beh Final Form
            '\u{FE8F}', // Beh Isolated Form
            '\u{FE91}', // Beh Initial Form
        ],
        canonical: '\u{0628}', // Beh
    },
    EquivalenceRule {
        sources: &[
            '\u{FB56}', // Peh Isolated Form
            '\u{FB57}', // Peh Final Form
            '\u{FB59}', // Peh Medial Form
            '\u{FE92}', // Beh Medial Form
            '\u{FB58}', // Peh Initial Form
        ],
        canonical: '\u{067E}', // Peh
    },
    EquivalenceRule {
        sources: &[
            '\u{FB61}', // Tteheh Medial Form
            '\u{067A}', // Tteheh
            '\u{0679}', // Tteh
            '\u{FB5E}', // Tteheh Isolated Form
            '\u{067F}', // Teheh
            '\u{067C}', // Teh With Ring
            '\u{FE95}', // Teh Isolated Form
            '\u{FE97}', // Teh Initial Form
            '\u{FE96}', // Teh Final Form
            '\u{FE98}', // Teh Medial Form
        ],
        canonical: '\u{062A}', // Teh
    },
    EquivalenceRule {
        sources: &[
            '\u{FE99}', // Theh Isolated Form
            '\u{FE9B}', // Theh Initial Form
        ],
        canonical: '\u{062B}', // Theh
    },
    EquivalenceRule {
        sources: &[
            '\u{FE9D}', // Jeem Isolated Form
            '\u{0683}', // Nyeh
            '\u{FEA0}', // Jeem Medial Form
            '\u{FE9F}', // Jeem Initial Form
        ],
        canonical: '\u{062C}', // Jeem
    },
    EquivalenceRule {
        sources: &[
            '\u{0683}', // Nyeh
            '\u{FB7D}', // Tcheh Medial Form
            '\u{FB7C}', // Tcheh Initial Form
        ],
        canonical: '\u{0686}', // Tcheh
    },
    EquivalenceRule {
        sources: &[
            '\u{FEA2}', // Hah Final Form
            '\u{FEA4}', // Hah Medial Form
            '\u{0685}', // Hah With Three Dots Above
            '\u{0681}', // Hah With Hamza Above
            '\u{FEA3}', // Hah Initial Form
        ],
        canonical: '\u{062D}', // Hah
    },
    EquivalenceRule {
        sources: &[
            '\u{FEA5}', // Khah Isolated Form
            '\u{FEA6}', // Khah Final Form
            '\u{FEA8}', // Khah Medial Form
            '\u{FEA7}', // Khah Initial Form
        ],
        canonical: '\u{062E}', // Khah
    },
    EquivalenceRule {
        sources: &[
            '\u{068F}', // Dal With Three Dots Above Downwards
            '\u{0689}', // Dal With Ring
            '\u{FEAA}', // Dal Final Form
            '\u{FEA9}', // Dal Isolated Form
        ],
        canonical: '\u{062F}', // Dal
    },
    EquivalenceRule {
        sources: &[
            '\u{0699}', // Reh With Four Dots Above
            '\u{0697}', // Reh With Two Dots Above
            '\u{0692}', // Reh With Small V
            '\u{0691}', // Rreh
            '\u{0695}', // Reh With Small V Below
            '\u{FEAD}', // Reh Isolated Form
            '\u{FEAE}', // Reh Final Form
        ],
        canonical: '\u{0631}', // Reh
    },
    EquivalenceRule {
        sources: &[
            '\u{FEAE}', // Reh Final Form
            '\u{FEAF}', // Zain Isolated Form
        ],
        canonical: '\u{0632}', // Zain
    },
    EquivalenceRule {
        sources: &[
            '\u{FB8A}', // Jeh Isolated Form
        ],
        canonical: '\u{0698}', // Jeh
    },
    EquivalenceRule {
        sources: &[
            '\u{076D}', // Seen With Two Dots Vertically Above
            '\u{075C}', // Seen With Four Dots Above
            '\u{FEB1}', // Seen Isolated Form
            '\u{FEB2}', // Seen Final Form
            '\u{069A}', // Seen With Dot Below And Dot Above
            '\u{FEB4}', // Seen Medial Form
            '\u{FEB3}', // Seen Initial Form
        ],
        canonical: '\u{0633}', // Seen
    },
    EquivalenceRule {
        sources: &[
            '\u{FEB5}', // Sheen Isolated Form
            '\u{FEB6}', // Sheen Final Form
            '\u{FEB8}', // Sheen Medial Form
            '\u{FEB7}', // Sheen Initial Form
        ],
        canonical: '\u{0634}', // Sheen
    },
    EquivalenceRule {
        sources: &[
            '\u{FEBA}', // Sad Final Form
            '\u{FEBC}', // Sad Medial Form
            '\u{FEBB}', // Sad Initial Form
        ],
        canonical: '\u{0635}', // Sad
    },
    EquivalenceRule {
        sources: &[
            '\u{FEBD}', // Dad Isolated Form
            '\u{FEBE}', // Dad Final Form
            '\u{FEBF}', // Dad Initial Form
            '\u{FEC0}', // Dad Medial Form
        ],
        canonical: '\u{0636}', // Dad
    },
    EquivalenceRule {
        sources: &[
            '\u{FEC1}', // Tah Isolated Form
            '\u{FEC2}', // Tah Final Form
            '\u{FEC3}', // Tah Initial Form
            '\u{FEC4}', // Tah Medial Form
        ],
        canonical: '\u{0637}', // Tah
    },
    EquivalenceRule {
        sources: &[
            '\u{FEC6}', // Zah Final Form
            '\u{FEC7}', // Zah Initial Form
            '\u{FEC8}', // Zah Medial Form
        ],
        canonical: '\u{0638}', // Zah
    },
    EquivalenceRule {
        sources: &[
            '\u{06A0}', // Ain With Three Dots Above
            '\u{FEC9}', // Ain Isolated Form
            '\u{FECA}', // Ain Final Form
            '\u{FECB}', // Ain Initial Form
        ],
        canonical: '\u{0639}', // Ain
    },
    EquivalenceRule {
        sources: &[
            '\u{FECE}', // Ghain Final Form
            '\u{06FC}', // Ghain With Dot Below
            '\u{FECD}', // Ghain Isolated Form
            '\u{FED0}', // Ghain Medial Form
            '\u{FECF}', // Ghain Initial Form
        ],
        canonical: '\u{063A}', // Ghain
    },
    EquivalenceRule {
        sources: &[
            '\u{FED2}', // Feh Final Form
            '\u{FED1}', // Feh Isolated Form
            '\u{FED4}', // Feh Medial Form
            '\u{FED3}', // Feh Initial Form
        ],
        canonical: '\u{0641}', // Feh
    },
    EquivalenceRule {
        sources: &[
            '\u{FED5}', // Qaf Isolated Form
            '\u{06A4}', // Veh
            '\u{FED6}', // Qaf Final Form
            '\u{FED7}', // Qaf Initial Form
        ],
        canonical: '\u{0642}', // Qaf
    },
    EquivalenceRule {
        sources: &[
            '\u{06AD}', // Ng
            '\u{FEDA}', // Kaf Final Form
            '\u{FB8E}', // Keheh Isolated Form
            '\u{FEDC}', // Kaf Medial Form
            '\u{FB8F}', // Keheh Final Form
            '\u{06AB}', // Kaf With Ring
            '\u{FEDB}', // Kaf Initial Form
            '\u{FB91}', // Keheh Medial Form
            '\u{FB90}', // Keheh Initial Form
            '\u{06AA}', // Swash Kaf
            '\u{0643}', // Kaf
        ],
        canonical: '\u{06A9}', // Keheh
    },
    EquivalenceRule {
        sources: &[
            '\u{FB9A}', // Ngoeh Isolated Form
            '\u{FB92}', // Gaf Isolated Form
            '\u{FB93}', // Gaf Final Form
            '\u{FB95}', // Gaf Medial Form
            '\u{FB94}', // Gaf Initial Form
        ],
        canonical: '\u{06AF}', // Gaf
    },
    EquivalenceRule {
        sources: &[
            '\u{FEDD}', // Lam Isolated Form
            '\u{FEDE}', // Lam Final Form
            '\u{FEE0}', // Lam Medial Form
            '\u{06B5}', // Lam With Small V
        ],
        canonical: '\u{0644}', // Lam
    },
    EquivalenceRule {
        sources: &[
            '\u{FEE1}', // Meem Isolated Form
            '\u{FEE4}', // Meem Medial Form
            '\u{FEE2}', // Meem Final Form
            '\u{FEE3}', // Meem Initial Form
        ],
        canonical: '\u{0645}', // Meem
    },
    EquivalenceRule {
        sources: &[
            '\u{06BC}', // Noon With Ring
            '\u{FEE6}', // Noon Final Form
            '\u{FEE5}', // Noon Isolated Form
            '\u{FEE8}', // Noon Medial Form
        ],
        canonical: '\u{0646}', // Noon
    },
    EquivalenceRule {
        sources: &[
            '\u{0788}', // Thaana Letter Vaavu
            '\u{FBD9}', // Oe Isolated Form
            '\u{06C8}', // Yu
            '\u{06CB}', // Ve
            '\u{FE86}', // Waw With Hamza Above Final Form
            '\u{06CA}', // Waw With Two Dots Above
            '\u{06C7}', // U
            '\u{06CF}', // Waw With Dot Above
            '\u{06C5}', // Kirghiz Oe
            '\u{06C9}', // Kirghiz Yu
            '\u{FEED}', // Waw Isolated Form
            '\u{FEEE}', // Waw Final Form
            '\u{0624}', // Waw With Hamza Above
        ],
        canonical: '\u{0648}', // Waw
    },
    EquivalenceRule {
        sources: &[
            '\u{FE94}', // Teh Marbuta Final Form
            '\u{FEEC}', // Heh Medial Form
            '\u{06BE}', // Heh Doachashmee
            '\u{FEE9}', // Heh Isolated Form
            '\u{FEEB}', // Heh Initial Form
            '\u{FEEA}', // Heh Final Form
            '\u{06C0}', // Heh With Yeh Above
            '\u{06D5}', // Ae
            '\u{0629}', // Teh Marbuta
            '\u{06C1}', // Heh Goal
        ],
        canonical: '\u{0647}', // Heh
    },
    EquivalenceRule {
        sources: &[
            '\u{FB5B}', // Beheh Final Form
            '\u{FEEF}', // Alef Maksura Isolated Form
            '\u{06CD}', // Yeh With Tail
            '\u{FEF0}', // Alef Maksura Final Form
            '\u{FEF1}', // Yeh Isolated Form
            '\u{FEF2}', // Yeh Final Form
            '\u{06BA}', // Noon Ghunna
            '\u{FEF3}', // Yeh Initial Form
            '\u{FEF4}', // Yeh Medial Form
            '\u{FBFC}', // Farsi Yeh Isolated Form
            '\u{06D0}', // E
            '\u{FBFD}', // Farsi Yeh Final Form
            '\u{FBFE}', // Farsi Yeh Initial Form
            '\u{FBFF}', // Farsi Yeh Medial Form
            '\u{06CE}', // Yeh With Small V
            '\u{06D2}', // Yeh Barree
            '\u{0649}', // Alef Maksura
            '\u{064A}', // Yeh
        ],
        canonical: '\u{06CC}', // Farsi Yeh
    },
];

/// Applies an ordered rule table to text.
#[derive(Debug, Clone, Copy)]
pub struct GlyphNormalizer {
    rules: &'static [EquivalenceRule],
}

impl Default for GlyphNormalizer {
    fn default() -> Self {
        Self::new(PERSIAN_RULES)
    }
}

impl GlyphNormalizer {
    pub fn new(rules: &'static [EquivalenceRule]) -> Self {
        GlyphNormalizer { rules }
    }

    pub fn rules(&self) -> &'static [EquivalenceRule] {
        self.rules
    }

    /// Runs every rule over the whole string, one after another, so a rule
    /// sees the output of all rules before it.
    pub fn fold(&self, text: &str) -> String {
        let mut s = text.to_string();
        for rule in self.rules {
            if !s.chars().any(|c| rule.matches(c)) {
                continue;
            }
            s = s
                .chars()
                .map(|c| if rule.matches(c) { rule.canonical } else { c })
                .collect();
        }
        s
    }
}
