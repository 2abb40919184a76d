//! Fixed-degree polynomial arithmetic backing the nearest-point search.
//!
//! Coefficients are stored lowest degree first: `coeffs[i]` multiplies `t^i`.

#[derive(Clone, Copy, Debug)]
pub struct Polynomial<const N: usize> {
    pub coeffs: [f32; N],
}

impl<const N: usize> Polynomial<N> {
    pub fn value(&self, t: f32) -> f32 {
        let mut acc = 0.0;
        for &coeff in self.coeffs.iter().rev() {
            acc = acc * t + coeff;
        }
        acc
    }
}

macro_rules! impl_derivative {
    ($($N:literal),*) => {$(
        impl Polynomial<$N> {
            pub fn derivative(&self) -> Polynomial<{ $N - 1 }> {
                let mut coeffs = [0.0; $N - 1];
                let mut i = 1;
                while i < $N {
                    coeffs[i - 1] = self.coeffs[i] * (i as f32);
                    i += 1;
                }
                Polynomial { coeffs }
            }
        }
    )*};
}

impl_derivative!(3, 4, 5, 6, 7);

macro_rules! impl_newtons_root {
    ($($N:literal),*) => {$(
        impl Polynomial<$N> {
            pub fn newtons_root(&self, mut guess: f32, iters: u8) -> f32 {
                let deriv = self.derivative();
                for _ in 0..iters {
                    guess -= self.value(guess) / deriv.value(guess);
                }
                guess
            }
        }
    )*};
}

impl_newtons_root!(4, 6);

macro_rules! impl_squared {
    ($($N:literal),*) => {$(
        impl Polynomial<$N> {
            pub fn squared(&self) -> Polynomial<{ 2 * $N - 1 }> {
                let mut coeffs = [0.0; 2 * $N - 1];
                for (i, a) in self.coeffs.iter().enumerate() {
                    for (j, b) in self.coeffs.iter().enumerate() {
                        coeffs[i + j] += a * b;
                    }
                }
                Polynomial { coeffs }
            }
        }
    )*};
}

impl_squared!(3, 4);

impl<const N: usize> std::ops::Add for Polynomial<N> {
    type Output = Polynomial<N>;

    fn add(self, rhs: Self) -> Self::Output {
        let mut coeffs = [0.0; N];
        for (i, coeff) in coeffs.iter_mut().enumerate() {
            *coeff = self.coeffs[i] + rhs.coeffs[i];
        }
        Polynomial { coeffs }
    }
}

impl<const N: usize> std::ops::Sub for Polynomial<N> {
    type Output = Polynomial<N>;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut coeffs = [0.0; N];
        for (i, coeff) in coeffs.iter_mut().enumerate() {
            *coeff = self.coeffs[i] - rhs.coeffs[i];
        }
        Polynomial { coeffs }
    }
}
