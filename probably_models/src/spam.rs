//! Word based spam classification.
//!
//! With `S` the message type and `W` the set of known words:
//!
//! - `P(S)` is the prior, from the number of messages seen per type;
//! - `P(W = w | S)` is the likelihood, from the word counts per type;
//! - `P(S | W1 = w1, W2 = w2, ..) ∝ P(W1 = w1 | S) · P(W2 = w2 | S) · .. · P(S)`.
//!
//! A [`SpamClassifier`] precomputes, per known word, how characteristic the
//! word is and the posterior it induces from a uniform prior; then combines the
//! most characteristic words of a message with a [`Strategy`].

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use probably_core::event::just;
use probably_core::{DistError, Distribution, Mass};

/// Floor applied to every per-word posterior, so that no single word can rule
/// out a message type.
const MIN_CLASS_MASS: Mass = 0.01;

/// Default number of words taken into account when classifying.
pub const DEFAULT_CLASSIFIERS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MsgType {
    Spam,
    Ham,
}

pub const MSG_TYPES: [MsgType; 2] = [MsgType::Spam, MsgType::Ham];

impl MsgType {
    fn index(self) -> usize {
        match self {
            MsgType::Spam => 0,
            MsgType::Ham => 1,
        }
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MsgType::Spam => write!(f, "spam"),
            MsgType::Ham => write!(f, "ham"),
        }
    }
}

/// Learned database: message counts and word counts per message type.
#[derive(Debug, Clone)]
pub struct SpamKnowledge {
    msg_counts: [usize; 2],
    word_counts: BTreeMap<String, [usize; 2]>,
}

impl SpamKnowledge {
    /// `msg_counts` and every entry of `word_counts` are indexed `[spam, ham]`.
    pub fn new<I, S>(msg_counts: [usize; 2], word_counts: I) -> SpamKnowledge
    where
        I: IntoIterator<Item = (S, [usize; 2])>,
        S: Into<String>,
    {
        SpamKnowledge {
            msg_counts,
            word_counts: word_counts
                .into_iter()
                .map(|(w, c)| (w.into(), c))
                .collect(),
        }
    }

    /// The small base of examples the classifier ships with.
    pub fn base() -> SpamKnowledge {
        SpamKnowledge::new(
            [102, 57],
            vec![
                ("the", [1, 2]),
                ("quick", [1, 1]),
                ("brown", [0, 1]),
                ("fox", [0, 1]),
                ("jumps", [0, 1]),
                ("over", [0, 1]),
                ("lazy", [0, 1]),
                ("dog", [0, 1]),
                ("make", [1, 0]),
                ("money", [1, 0]),
                ("in", [1, 0]),
                ("online", [1, 0]),
                ("casino", [1, 0]),
                ("free", [57, 6]),
                ("bayes", [1, 10]),
                ("monad", [0, 22]),
                ("hello", [30, 32]),
                ("asdf", [40, 2]),
            ],
        )
    }

    pub fn known_words(&self) -> impl Iterator<Item = &str> {
        self.word_counts.keys().map(String::as_str)
    }

    pub fn count_type(&self, msg_type: MsgType) -> usize {
        self.msg_counts[msg_type.index()]
    }

    /// Zero for unknown words.
    pub fn count_word(&self, word: &str, msg_type: MsgType) -> usize {
        self.word_counts
            .get(word)
            .map(|counts| counts[msg_type.index()])
            .unwrap_or(0)
    }

    /// `P(S)`
    pub fn p_msg_type(&self) -> Result<Distribution<MsgType>, DistError> {
        let weights: Vec<Mass> = self.msg_counts.iter().map(|c| *c as Mass).collect();
        Distribution::enumerated(MSG_TYPES.iter().copied(), &weights)
    }

    /// `P(W = word | S = msg_type)`
    pub fn p_word(&self, word: &str, msg_type: MsgType) -> Result<Distribution<bool>, DistError> {
        let total = self.count_type(msg_type);
        if total == 0 {
            return Err(DistError::InvalidParameter(format!(
                "no messages of type `{}`",
                msg_type
            )));
        }
        let n = self.count_word(word, msg_type) as Mass;
        Distribution::choose(n / total as Mass, true, false)
    }

    /// `P(S | W = word)` from the given prior.
    pub fn p_has_word(
        &self,
        word: &str,
        prior: &Distribution<MsgType>,
    ) -> Result<Distribution<MsgType>, DistError> {
        prior
            .try_bind(|&msg_type| {
                let seen = self.p_word(word, msg_type)?;
                Ok(Some(seen.event_bind(just(true), |_| {
                    Some(Distribution::point_mass(msg_type))
                })))
            })?
            .normalize()
    }

    /// `P(S | W1 = w1, W2 = w2, ..)`, applying one word at a time.
    pub fn p_has_words<'a, I>(
        &self,
        words: I,
        prior: &Distribution<MsgType>,
    ) -> Result<Distribution<MsgType>, DistError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        words
            .into_iter()
            .try_fold(prior.clone(), |p, w| self.p_has_word(w, &p))
    }
}

impl Default for SpamKnowledge {
    fn default() -> SpamKnowledge {
        SpamKnowledge::base()
    }
}

/// How the per-word posteriors of a message are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Chains every word as independent evidence, normalizing once at the end.
    NaiveBayes,
    /// Combines the naive Bayes hypothesis with the inverse chi-square
    /// distribution, degrees of freedom being the number of words used.
    Fisher,
}

impl Strategy {
    fn apply(
        self,
        classifiers: &[&Distribution<MsgType>],
        prior: &Distribution<MsgType>,
    ) -> Result<Distribution<MsgType>, DistError> {
        match self {
            Strategy::NaiveBayes => naive_bayes(classifiers, prior),
            Strategy::Fisher => fisher(classifiers, prior),
        }
    }
}

fn naive_bayes(
    classifiers: &[&Distribution<MsgType>],
    prior: &Distribution<MsgType>,
) -> Result<Distribution<MsgType>, DistError> {
    let mut hypothesis = prior.clone();
    for word_probs in classifiers {
        hypothesis = hypothesis.try_bind(|&msg_type| {
            let seen = Distribution::choose(word_probs.probability(&msg_type), true, false)?;
            Ok(Some(seen.event_bind(just(true), |_| {
                Some(Distribution::point_mass(msg_type))
            })))
        })?;
    }
    hypothesis.normalize()
}

/// Survival function of the chi-square distribution with `2 * dof` degrees of
/// freedom evaluated at `-2 ln(p)`, clamped to 1.
fn inverse_chi_square(p: Mass, dof: usize) -> Mass {
    if p <= 0.0 {
        return 0.0;
    }
    let m = -p.ln();
    let mut term = (-m).exp();
    let mut sum = term;
    for i in 1..dof {
        term *= m / i as f64;
        sum += term;
    }
    sum.min(1.0)
}

fn fisher(
    classifiers: &[&Distribution<MsgType>],
    prior: &Distribution<MsgType>,
) -> Result<Distribution<MsgType>, DistError> {
    let hypothesis = naive_bayes(classifiers, prior)?;
    let dof = classifiers.len();
    let chi: BTreeMap<MsgType, Mass> = hypothesis
        .iter()
        .map(|(msg_type, p)| (*msg_type, inverse_chi_square(p, dof)))
        .collect();
    debug!("inverse chi-square over {} words: {:?}", dof, chi);

    let combined = chi.keys().map(|msg_type| {
        let mass = chi
            .iter()
            .filter(|(other, _)| *other != msg_type)
            .map(|(_, p)| 1.0 - p)
            .sum::<Mass>();
        (*msg_type, mass)
    });
    Distribution::from_map(combined)
}

#[derive(Debug, Clone)]
struct WordClassifier {
    score: f64,
    probs: Distribution<MsgType>,
}

/// Classifies messages from the words they contain.
#[derive(Debug, Clone)]
pub struct SpamClassifier {
    knowledge: SpamKnowledge,
    strategy: Strategy,
    classifiers: BTreeMap<String, WordClassifier>,
}

impl SpamClassifier {
    pub fn new(knowledge: SpamKnowledge, strategy: Strategy) -> Result<SpamClassifier, DistError> {
        let uniform = Distribution::uniform(MSG_TYPES.iter().copied())?;
        let mut classifiers = BTreeMap::new();
        for word in knowledge.known_words() {
            let characteristic = knowledge.p_has_word(word, &uniform)?;
            let score = characteristic.distance(&uniform);
            let probs = characteristic.adjust_min(MIN_CLASS_MASS)?;
            debug!("classifier for `{}`: score {}", word, score);
            classifiers.insert(word.to_owned(), WordClassifier { score, probs });
        }
        Ok(SpamClassifier {
            knowledge,
            strategy,
            classifiers,
        })
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn knowledge(&self) -> &SpamKnowledge {
        &self.knowledge
    }

    /// How characteristic a known word is, `None` for unknown words.
    pub fn score(&self, word: &str) -> Option<f64> {
        self.classifiers.get(word).map(|c| c.score)
    }

    /// Up to `n` known words of the message with the highest score, best first.
    /// Unknown words are ignored; ties keep the message order.
    fn find_classifiers<'a>(&'a self, words: &[&str], n: usize) -> Vec<&'a Distribution<MsgType>> {
        let mut found: Vec<&WordClassifier> =
            words.iter().filter_map(|w| self.classifiers.get(*w)).collect();
        found.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        found.into_iter().take(n).map(|c| &c.probs).collect()
    }

    /// `P(S | words)` using the `n` most characteristic words of the message.
    pub fn p_msg_type_by_words(
        &self,
        words: &[&str],
        n: usize,
    ) -> Result<Distribution<MsgType>, DistError> {
        let prior = self.knowledge.p_msg_type()?;
        let classifiers = self.find_classifiers(words, n);
        debug!(
            "classifying with {} of {} words ({:?})",
            classifiers.len(),
            words.len(),
            self.strategy
        );
        self.strategy.apply(&classifiers, &prior)
    }

    pub fn classify(&self, words: &[&str], n: usize) -> Result<(MsgType, Mass), DistError> {
        let posterior = self.p_msg_type_by_words(words, n)?;
        let (msg_type, p) = posterior.most_probable()?;
        Ok((*msg_type, p))
    }
}
