//! Supported Wikisource languages
//!
//! Every code here has its own Wikisource subdomain. The list is fixed at
//! build time and kept sorted so lookups can binary search it.

use std::fmt;

/// Language codes with a Wikisource edition, sorted
pub const LANGUAGES: [&str; 222] = [
    "aat", "ab", "ady", "ae", "af", "akk", "an", "ar", "arn", "arp", "as", "ast", "az", "ba",
    "bal", "ban", "bar", "be", "bem", "bg", "bm", "bn", "bo", "br", "brx", "bs", "ca", "cdo",
    "chr", "chu", "cnr", "co", "cop", "cpx", "cs", "csb", "cu", "cv", "cy", "da", "de", "diq",
    "dsb", "egy", "el", "en", "eo", "es", "et", "eu", "ext", "fa", "fi", "fo", "fr", "frr", "fur",
    "fy", "ga", "gag", "gd", "gl", "gld", "got", "grc", "gsw", "gu", "gv", "hak", "haw", "he",
    "hi", "hr", "hsb", "ht", "hu", "hy", "ia", "id", "io", "is", "ist", "it", "iu", "ja", "jbo",
    "jct", "jv", "ka", "kk", "km", "kn", "ko", "koi", "krl", "ku", "kw", "ky", "la", "lad", "lb",
    "les", "lg", "li", "lij", "lis", "liv", "lld", "lmo", "ln", "lo", "lra", "lt", "lv", "lzh",
    "mai", "mas", "mdf", "mfe", "mg", "mh", "mhr", "mi", "min", "mk", "ml", "mn", "mnc", "mnp",
    "mr", "mrj", "ms", "mwl", "my", "myv", "nah", "nan", "nds", "ne", "ng", "nl", "no", "non",
    "nrn", "nv", "oc", "olo", "osx", "ota", "pa", "pau", "pcd", "pdt", "peo", "pfl", "pi", "pl",
    "pms", "pnb", "pnt", "pox", "ps", "pt", "qu", "rm", "rml", "ro", "ru", "ruo", "rup", "ryu",
    "sa", "sah", "sc", "scn", "sco", "se", "see", "sh", "si", "sjd", "sjk", "sjo", "sk", "sl",
    "slr", "sn", "sq", "sr", "stq", "su", "suk", "sv", "sw", "ta", "tah", "te", "tet", "tg", "th",
    "tl", "tpn", "tr", "tt", "txg", "udm", "ug", "uk", "ur", "uz", "vec", "vep", "vi", "vo", "wa",
    "wym", "xh", "xmf", "yi", "yue", "zh", "zu",
];

/// A language code known to be in [`LANGUAGES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageCode(&'static str);

impl LanguageCode {
    /// Look up a token, ignoring ASCII and Unicode case
    pub fn lookup(token: &str) -> Option<Self> {
        let lower = token.to_lowercase();
        LANGUAGES
            .binary_search(&lower.as_str())
            .ok()
            .map(|idx| Self(LANGUAGES[idx]))
    }

    /// Iterate over every supported language
    pub fn all() -> impl Iterator<Item = LanguageCode> {
        LANGUAGES.iter().copied().map(Self)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
