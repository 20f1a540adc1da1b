/*!
 * Chinese-to-Latin transliteration.
 *
 * Uses a curated dictionary of high-frequency characters mapped to their
 * toneless pinyin. Unmapped Han characters fall back to a deterministic
 * hash-derived token (`z` plus four hex digits of the character's SHA-256),
 * so the output is always non-empty and reproducible for any input.
 */

use std::collections::HashMap;

use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

use super::Transliterator;

/// Curated high-frequency character to pinyin dictionary
static PINYIN_MAP: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Numerals and quantities
        ('一', "yi"),
        ('二', "er"),
        ('三', "san"),
        ('四', "si"),
        ('五', "wu"),
        ('六', "liu"),
        ('七', "qi"),
        ('八', "ba"),
        ('九', "jiu"),
        ('十', "shi"),
        ('百', "bai"),
        ('千', "qian"),
        ('万', "wan"),
        // Time
        ('年', "nian"),
        ('月', "yue"),
        ('日', "ri"),
        ('时', "shi"),
        ('分', "fen"),
        ('今', "jin"),
        ('天', "tian"),
        ('周', "zhou"),
        // People and places
        ('人', "ren"),
        ('中', "zhong"),
        ('国', "guo"),
        ('世', "shi"),
        ('界', "jie"),
        ('城', "cheng"),
        ('市', "shi"),
        ('家', "jia"),
        ('地', "di"),
        ('方', "fang"),
        // Business and economy
        ('公', "gong"),
        ('司', "si"),
        ('企', "qi"),
        ('业', "ye"),
        ('商', "shang"),
        ('经', "jing"),
        ('济', "ji"),
        ('金', "jin"),
        ('融', "rong"),
        ('投', "tou"),
        ('资', "zi"),
        ('银', "yin"),
        ('行', "hang"),
        ('场', "chang"),
        ('产', "chan"),
        ('品', "pin"),
        ('服', "fu"),
        ('务', "wu"),
        ('价', "jia"),
        ('值', "zhi"),
        // Technology
        ('科', "ke"),
        ('技', "ji"),
        ('术', "shu"),
        ('数', "shu"),
        ('据', "ju"),
        ('网', "wang"),
        ('络', "luo"),
        ('智', "zhi"),
        ('能', "neng"),
        ('电', "dian"),
        ('子', "zi"),
        ('信', "xin"),
        ('息', "xi"),
        ('系', "xi"),
        ('统', "tong"),
        ('安', "an"),
        ('全', "quan"),
        ('软', "ruan"),
        ('件', "jian"),
        // News and media
        ('新', "xin"),
        ('闻', "wen"),
        ('报', "bao"),
        ('道', "dao"),
        ('发', "fa"),
        ('展', "zhan"),
        ('布', "bu"),
        ('文', "wen"),
        ('化', "hua"),
        ('章', "zhang"),
        // Health and environment
        ('健', "jian"),
        ('康', "kang"),
        ('医', "yi"),
        ('疗', "liao"),
        ('环', "huan"),
        ('境', "jing"),
        ('源', "yuan"),
        // Common verbs and modifiers
        ('大', "da"),
        ('小', "xiao"),
        ('上', "shang"),
        ('下', "xia"),
        ('好', "hao"),
        ('高', "gao"),
        ('长', "chang"),
        ('会', "hui"),
        ('学', "xue"),
        ('教', "jiao"),
        ('育', "yu"),
        ('工', "gong"),
        ('作', "zuo"),
        ('生', "sheng"),
        ('活', "huo"),
        ('旅', "lyu"),
        ('游', "you"),
        ('汽', "qi"),
        ('车', "che"),
        ('房', "fang"),
        ('食', "shi"),
        ('物', "wu"),
        ('管', "guan"),
        ('理', "li"),
        ('和', "he"),
        ('与', "yu"),
        ('的', "de"),
        ('了', "le"),
        ('在', "zai"),
        ('是', "shi"),
        ('有', "you"),
        ('为', "wei"),
        ('不', "bu"),
        ('最', "zui"),
    ])
});

/// Whether a character is a Han ideograph (CJK Unified, base block)
fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Deterministic token for an unmapped Han character
fn hash_token(c: char) -> String {
    let mut buf = [0u8; 4];
    let digest = Sha256::digest(c.encode_utf8(&mut buf).as_bytes());
    format!("z{:02x}{:02x}", digest[0], digest[1])
}

/// Transliterator for Chinese titles
pub struct ChineseTransliterator;

impl Transliterator for ChineseTransliterator {
    fn transliterate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() * 2);
        for c in text.chars() {
            if let Some(pinyin) = PINYIN_MAP.get(&c) {
                push_syllable(&mut out, pinyin);
            } else if is_han(c) {
                // Unmapped ideograph: hash fallback, never a silent drop
                let token = hash_token(c);
                push_syllable(&mut out, &token);
            } else {
                out.push(c);
            }
        }
        out
    }
}

/// Append a syllable with a separating space so slugification hyphenates it
fn push_syllable(out: &mut String, syllable: &str) {
    if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
    }
    out.push_str(syllable);
    out.push(' ');
}
