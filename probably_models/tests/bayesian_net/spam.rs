use probably_core::event::just;
use probably_core::Distribution;
use probably_models::spam::{MsgType, SpamClassifier, SpamKnowledge, Strategy, MSG_TYPES};

use super::{init, EPSILON};

const CORPUS: &[&[&str]] = &[
    &["free"],
    &["monad"],
    &["free", "asdf", "bayes", "quick", "jump", "test"],
    &["free", "monad", "asdf", "bayes", "quick", "jump", "test"],
];

/// Same evidence, excluded mass kept across every word and normalized once.
fn deferred(
    knowledge: &SpamKnowledge,
    words: &[&str],
    prior: &Distribution<MsgType>,
) -> Distribution<MsgType> {
    let mut hypothesis = prior.clone();
    for word in words {
        hypothesis = hypothesis
            .try_bind(|&msg_type| {
                let seen = knowledge.p_word(word, msg_type)?;
                Ok(Some(seen.event_bind(just(true), |_| {
                    Some(Distribution::point_mass(msg_type))
                })))
            })
            .unwrap();
    }
    hypothesis.normalize().unwrap()
}

#[test]
fn deferred_normalization_matches_stepwise() {
    init();
    let knowledge = SpamKnowledge::base();
    let prior = knowledge.p_msg_type().unwrap();
    let uniform = Distribution::uniform(MSG_TYPES.iter().copied()).unwrap();
    for words in &[
        vec!["free"],
        vec!["free", "asdf"],
        vec!["hello", "bayes", "quick", "the"],
    ] {
        for start in &[&prior, &uniform] {
            let stepwise = knowledge.p_has_words(words.iter().copied(), start).unwrap();
            let once = deferred(&knowledge, words, start);
            assert!(stepwise.approx_eq(&once, EPSILON));
        }
    }
}

#[test]
fn classify_corpus() {
    init();
    for strategy in &[Strategy::NaiveBayes, Strategy::Fisher] {
        let classifier = SpamClassifier::new(SpamKnowledge::base(), *strategy).unwrap();
        let expected = [MsgType::Spam, MsgType::Ham, MsgType::Spam];
        for (words, msg_type) in CORPUS.iter().zip(expected.iter()) {
            let (found, p) = classifier.classify(words, 15).unwrap();
            assert_eq!(found, *msg_type, "{:?} with {:?}", words, strategy);
            assert!(p >= 0.5);
        }
        let mixed = classifier.p_msg_type_by_words(CORPUS[3], 15).unwrap();
        assert!(mixed.is_normalized());
    }
}

#[test]
fn most_characteristic_words_first() {
    init();
    let classifier = SpamClassifier::new(SpamKnowledge::base(), Strategy::NaiveBayes).unwrap();
    let words = CORPUS[2];
    // "bayes" has the highest score of the message and leans to ham
    let (alone, _) = classifier.classify(words, 1).unwrap();
    assert_eq!(alone, MsgType::Ham);
    let (all, _) = classifier.classify(words, 15).unwrap();
    assert_eq!(all, MsgType::Spam);
    assert!(classifier.score("bayes").unwrap() > classifier.score("asdf").unwrap());
}
