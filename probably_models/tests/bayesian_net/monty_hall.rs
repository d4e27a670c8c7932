use float_cmp::approx_eq;
use probably_models::monty_hall::{opened, stay, switch, winner, Outcome};

use super::{init, EPSILON};

#[test]
fn switching_doubles_the_odds() {
    init();
    let game = opened().unwrap();
    let stayed = winner(&stay(&game).unwrap());
    let switched = winner(&switch(&game).unwrap());
    assert!(approx_eq!(
        f64,
        stayed.probability(&Outcome::Winner),
        1.0 / 3.0,
        epsilon = EPSILON
    ));
    assert!(approx_eq!(
        f64,
        switched.probability(&Outcome::Winner),
        2.0 / 3.0,
        epsilon = EPSILON
    ));
    assert!(approx_eq!(
        f64,
        switched.probability(&Outcome::Loser),
        stayed.probability(&Outcome::Winner),
        epsilon = EPSILON
    ));
}
