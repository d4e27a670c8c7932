use float_cmp::approx_eq;
use probably_models::screening::{Condition, Screening, TestResult};

use super::{init, EPSILON};

#[test]
fn positive_diagnosis() {
    init();
    let test = Screening::diagnosis();
    let expected = 0.001 * 0.99 / (0.001 * 0.99 + 0.999 * 0.01);
    for posterior in &[
        test.posterior_by_filter(TestResult::Positive).unwrap(),
        test.posterior_by_condition(TestResult::Positive).unwrap(),
        test.posterior_by_exclusion(TestResult::Positive).unwrap(),
    ] {
        let ill = posterior.probability(&Condition::Ill);
        assert!(approx_eq!(f64, ill, expected, epsilon = EPSILON));
        assert!((ill - 0.0902).abs() < 1e-4);
        assert_eq!(*posterior.most_probable().unwrap().0, Condition::Healthy);
    }
}

#[test]
fn drug_test() {
    init();
    // 0.5% users, 99% sensitive, 99% specific
    let test = Screening::new(0.005, 0.99, 0.01).unwrap();
    let user = test
        .posterior_by_condition(TestResult::Positive)
        .unwrap()
        .probability(&Condition::Ill);
    let expected = 0.005 * 0.99 / (0.005 * 0.99 + 0.995 * 0.01);
    assert!(approx_eq!(f64, user, expected, epsilon = EPSILON));

    let clean = test
        .posterior_by_filter(TestResult::Negative)
        .unwrap()
        .probability(&Condition::Healthy);
    assert!(clean > 0.9999);
}
