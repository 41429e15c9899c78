use crate::constants::{PI, TWO_PI};
use crate::Num;

const MAX_STEPS: usize = 64;

/// Approximates the root of a function using the Newton-Raphson method.
///
/// # Arguments
/// f - The function to approximate the root of.
/// f_prime - The derivative of the function.
/// x0 - The initial guess.
/// epsilon - The maximum error allowed.
///
/// # Returns
/// The approximate root of the function. If the iteration has not settled
/// after `MAX_STEPS` the last estimate is returned.
pub fn newton_approx(
    f: impl Fn(Num) -> Num,
    f_prime: impl Fn(Num) -> Num,
    x0: Num,
    epsilon: Num,
) -> Num {
    let mut x = x0;

    for _ in 0..MAX_STEPS {
        let x_next = x - f(x) / f_prime(x);

        let error = (x_next - x).abs();

        if error < epsilon {
            return x_next;
        }

        x = x_next;
    }

    x
}

/// Eccentric anomaly (E) for a mean anomaly (M), from Kepler's equation
/// M = E - e * sin(E)
///
/// https://orbital-mechanics.space/time-since-periapsis-and-keplers-equation/elliptical-orbits.html#equation-eq-keplers-equation-ellipse
#[allow(non_snake_case)]
pub fn eccentric_anomaly(M: Num, e: Num, tolerance: Num) -> Num {
    let M = M.rem_euclid(TWO_PI);
    // Starting from pi keeps Newton stable for very eccentric orbits
    let x0 = if e > 0.8 { PI } else { M };

    newton_approx(
        // f(E) = E - e*sin(E) - M
        |E| E - (e * E.sin()) - M,
        // f'(E) = 1 - e*cos(E)
        |E| 1.0 - (e * E.cos()),
        x0,
        tolerance,
    )
}
