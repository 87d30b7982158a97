//! Polarity lexicon, aspect seed terms and tokenizer vocabulary
//!
//! Korean is agglutinative, so polarity is matched on stems (`맛있`, `친절`)
//! as substrings. Matching is longest-first and left-to-right: `불친절`
//! consumes its `친절`, and `안 좋` consumes its `좋`.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::analysis::MIN_TOKEN_CHARS;

const POSITIVE: &[&str] = &[
    // ko
    "맛있", "맛나", "존맛", "맛집", "친절", "깔끔", "깨끗", "최고", "추천", "훌륭", "좋", "만족",
    "신선", "재방문", "또 올", "가성비", "푸짐", "바삭", "부드럽", "촉촉", "감동", "굿", "대박",
    "빠르", "저렴", "착하", "고소", "든든", "행복",
    // en
    "delicious", "tasty", "great", "good", "friendly", "clean", "excellent", "amazing",
    "recommend", "fresh", "love", "nice", "best", "kind",
];

const NEGATIVE: &[&str] = &[
    // ko
    "맛없", "맛이 없", "별로", "불친절", "친절하지 않", "최악", "비싸", "더럽", "지저분", "비위생",
    "느리", "늦", "실망", "비추", "아쉽", "아쉬", "불만", "불쾌", "짜요", "짜고", "짰", "싱겁",
    "눅눅", "식었", "퍽퍽", "느끼", "오래 걸", "안 좋", "좋지 않", "깨끗하지 않", "다시는",
    // en
    "not good", "bad", "rude", "dirty", "slow", "expensive", "overpriced", "terrible", "awful",
    "worst", "cold", "salty", "disappoint", "bland",
];

/// Aspect name and the terms whose presence marks a review as mentioning it
const ASPECTS: &[(&str, &[&str])] = &[
    (
        "맛",
        &[
            "맛", "음식", "메뉴", "요리", "식감", "양이", "taste", "food", "flavor", "menu",
            "delicious",
        ],
    ),
    (
        "서비스",
        &[
            "서비스", "직원", "친절", "응대", "사장", "알바", "서빙", "주문", "service", "staff",
            "friendly", "rude", "waiter",
        ],
    ),
    (
        "가격",
        &[
            "가격", "가성비", "비싸", "저렴", "값", "비용", "할인", "price", "expensive", "cheap",
            "value",
        ],
    ),
    (
        "분위기",
        &[
            "분위기", "인테리어", "매장", "좌석", "자리", "음악", "atmosphere", "interior", "vibe",
            "seat",
        ],
    ),
    (
        "위생",
        &[
            "위생", "청결", "깨끗", "깔끔", "더럽", "지저분", "화장실", "clean", "dirty", "hygiene",
        ],
    ),
];

const STOPWORDS: &[&str] = &[
    // ko
    "너무", "정말", "진짜", "그냥", "조금", "많이", "아주", "완전", "그리고", "근데", "하지만",
    "있어", "있는", "있고", "없어", "했어", "하고", "같아", "제가", "저는", "여기", "이번", "다시",
    "이거", "그거", "저희", "먹었", "먹고", "먹었어", "갔는데", "했는데", "입니다", "합니다",
    // en
    "the", "and", "is", "was", "it", "to", "of", "for", "with", "but", "very", "so", "this",
    "that", "we", "you", "are", "in", "on", "at", "not", "my", "be", "have", "had", "there",
    "they", "were", "our",
];

/// Trailing particles/endings stripped from Korean tokens, longest first
const PARTICLES: &[&str] = &[
    "이에요", "에서", "으로", "이랑", "까지", "부터", "예요", "이고", "이나", "은", "는", "이",
    "가", "을", "를", "에", "도", "로", "와", "과", "의", "만", "요",
];

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Positive,
    Negative,
}

/// Polarity hit counts for one text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolarityHits {
    pub positive: usize,
    pub negative: usize,
}

impl PolarityHits {
    /// (pos - neg) / (pos + neg), or `None` without any hit
    pub fn score(&self) -> Option<f32> {
        let total = self.positive + self.negative;
        if total == 0 {
            return None;
        }
        Some((self.positive as f32 - self.negative as f32) / total as f32)
    }
}

pub struct Aspect {
    pub name: &'static str,
    seeds: &'static [&'static str],
}

impl Aspect {
    pub fn mentioned_in(&self, lowered: &str) -> bool {
        self.seeds.iter().any(|seed| lowered.contains(seed))
    }
}

pub struct Lexicon {
    /// Stems sorted by byte length, longest first
    stems: Vec<(&'static str, Polarity)>,
    aspects: Vec<Aspect>,
}

impl Default for Lexicon {
    fn default() -> Self {
        let mut stems: Vec<(&'static str, Polarity)> = POSITIVE
            .iter()
            .map(|s| (*s, Polarity::Positive))
            .chain(NEGATIVE.iter().map(|s| (*s, Polarity::Negative)))
            .collect();
        stems.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));

        let aspects = ASPECTS
            .iter()
            .map(|(name, seeds)| Aspect { name, seeds })
            .collect();

        Self { stems, aspects }
    }
}

impl Lexicon {
    pub fn aspects(&self) -> &[Aspect] {
        &self.aspects
    }

    /// Count polarity stems in already-lowercased text
    pub fn polarity(&self, lowered: &str) -> PolarityHits {
        let mut hits = PolarityHits::default();
        let mut rest = lowered;

        while !rest.is_empty() {
            if let Some((stem, polarity)) = self.stems.iter().find(|(s, _)| rest.starts_with(s)) {
                match polarity {
                    Polarity::Positive => hits.positive += 1,
                    Polarity::Negative => hits.negative += 1,
                }
                rest = &rest[stem.len()..];
            } else {
                let step = rest.chars().next().map(char::len_utf8).unwrap_or(1);
                rest = &rest[step..];
            }
        }

        hits
    }

    /// Keyword candidates: word tokens minus stopwords, particles stripped
    pub fn tokens(&self, lowered: &str) -> Vec<String> {
        TOKEN
            .find_iter(lowered)
            .map(|m| strip_particle(m.as_str()))
            .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
            .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
            .filter(|t| !STOPWORDS.contains(&t.as_str()))
            .collect()
    }
}

fn strip_particle(token: &str) -> String {
    for particle in PARTICLES {
        if let Some(stem) = token.strip_suffix(particle)
            && stem.chars().count() >= MIN_TOKEN_CHARS
        {
            return stem.to_string();
        }
    }
    token.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_match_wins() {
        let lexicon = Lexicon::default();
        let hits = lexicon.polarity("직원이 불친절해요");
        assert_eq!(hits.positive, 0);
        assert_eq!(hits.negative, 1);

        let hits = lexicon.polarity("맛은 안 좋았어요");
        assert_eq!(hits, PolarityHits { positive: 0, negative: 1 });
    }

    #[test]
    fn test_mixed_polarity_score() {
        let lexicon = Lexicon::default();
        let hits = lexicon.polarity("맛있는데 너무 비싸고 직원이 친절해요");
        assert_eq!(hits.positive, 2);
        assert_eq!(hits.negative, 1);
        let score = hits.score().unwrap();
        assert!((score - 1.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_english_polarity() {
        let lexicon = Lexicon::default();
        let hits = lexicon.polarity("not good, staff was rude");
        assert_eq!(hits.negative, 2);
        assert_eq!(hits.positive, 0);
    }

    #[test]
    fn test_no_hits_has_no_score() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.polarity("").score(), None);
        assert_eq!(lexicon.polarity("12시에 방문").score(), None);
    }

    #[test]
    fn test_aspect_mentions() {
        let lexicon = Lexicon::default();
        let names: Vec<&str> = lexicon
            .aspects()
            .iter()
            .filter(|a| a.mentioned_in("가격 대비 음식이 괜찮아요"))
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["맛", "가격"]);
    }

    #[test]
    fn test_tokens_strip_particles_and_stopwords() {
        let lexicon = Lexicon::default();
        let tokens = lexicon.tokens("감자튀김이 정말 바삭하고 와퍼는 먹었어요");
        assert_eq!(tokens, vec!["감자튀김", "바삭하고", "와퍼"]);
    }

    #[test]
    fn test_tokens_drop_short_and_numeric() {
        let lexicon = Lexicon::default();
        assert!(lexicon.tokens("a 1 22 맛").is_empty());
    }
}
