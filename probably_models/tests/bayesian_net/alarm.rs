use probably_models::alarm::{
    conditioned, event_conditioned, joint, joint_filtered, paired, Evidence,
};

use super::{init, EPSILON};

fn burglary_given(evidence: &Evidence) -> Vec<f64> {
    let strategies = vec![
        joint_filtered(evidence, |w| w.burglary),
        conditioned(evidence, |w| w.burglary),
        event_conditioned(evidence, |w| w.burglary),
        paired(evidence, |w| w.burglary),
    ];
    strategies
        .into_iter()
        .map(|d| d.unwrap().probability(&true))
        .collect()
}

#[test]
fn both_called() {
    init();
    let answers = burglary_given(&Evidence::calls());
    // P(B | J, M) of the textbook network
    assert!((answers[0] - 0.284).abs() < 1e-3);
    for p in &answers[1..] {
        assert!((p - answers[0]).abs() < EPSILON);
    }
}

#[test]
fn alarm_without_earthquake() {
    init();
    let evidence = Evidence {
        earthquake: Some(false),
        alarm: Some(true),
        ..Evidence::calls()
    };
    let answers = burglary_given(&evidence);
    // J and M are independent of B once A is known
    let expected = 0.001 * 0.94 / (0.001 * 0.94 + 0.999 * 0.001);
    for p in &answers {
        assert!((p - expected).abs() < EPSILON);
    }
}

#[test]
fn joint_marginals() {
    init();
    let alarm = joint(|w| w.alarm).unwrap();
    let expected = 0.001 * 0.002 * 0.95
        + 0.001 * 0.998 * 0.94
        + 0.999 * 0.002 * 0.29
        + 0.999 * 0.998 * 0.001;
    assert!((alarm.probability(&true) - expected).abs() < EPSILON);
}
