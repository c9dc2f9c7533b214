use std::iter::Sum;
use std::ops::{Add, Deref, Div, Mul, Neg, Sub};

/// Creates a n-dimensional vector type and implements
/// the element-wise and scalar arithmetic on it.
///
/// # Arguments:
/// * `$Vec` name of the created vector type
/// * `$n` number of the dimension
///
/// # Example:
/// `VecN!(Vec2, 2)`
///
macro_rules! VecN {
    ($Vec: ident, $n: expr) => {

        #[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
        pub struct $Vec<T>(pub [T; $n]);

        impl<T> $Vec<T> {
            pub fn new(coord: [T; $n]) -> $Vec<T> { $Vec(coord) }
        }

        impl<T> From<[T; $n]> for $Vec<T> {
            fn from(coord: [T; $n]) -> $Vec<T> {
                $Vec(coord)
            }
        }

        impl<T> From<$Vec<T>> for [T; $n] {
            fn from(v: $Vec<T>) -> [T; $n] {
                v.0
            }
        }

        impl<T> Deref for $Vec<T> {
            type Target = [T; $n];

            fn deref(&self) -> &[T; $n] {
                &self.0
            }
        }

        impl<T> Add for $Vec<T> where T: Add<Output = T> + Copy {
            type Output = $Vec<T>;
            fn add(self, rhs: $Vec<T>) -> Self::Output {
                let mut me = self;
                for i in 0..$n {
                    me.0[i] = me.0[i] + rhs.0[i];
                }
                me
            }
        }

        impl<T> Sub for $Vec<T> where T: Sub<Output = T> + Copy {
            type Output = $Vec<T>;
            fn sub(self, rhs: $Vec<T>) -> Self::Output {
                let mut me = self;
                for i in 0..$n {
                    me.0[i] = me.0[i] - rhs.0[i];
                }
                me
            }
        }

        impl<T> Neg for $Vec<T> where T: Neg<Output = T> + Copy {
            type Output = $Vec<T>;
            fn neg(self) -> Self::Output {
                let mut me = self;
                for i in 0..$n {
                    me.0[i] = -me.0[i];
                }
                me
            }
        }

        impl<T> Mul<T> for $Vec<T> where T: Mul<T, Output = T> + Copy {
            type Output = $Vec<T>;
            fn mul(self, rhs: T) -> $Vec<T> {
                let mut me = self;
                for i in 0..$n {
                    me.0[i] = me.0[i] * rhs;
                }
                me
            }
        }

        impl<T> Div<T> for $Vec<T> where T: Div<T, Output = T> + Copy {
            type Output = $Vec<T>;
            fn div(self, rhs: T) -> $Vec<T> {
                let mut me = self;
                for i in 0..$n {
                    me.0[i] = me.0[i] / rhs;
                }
                me
            }
        }

        impl<T> Sum for $Vec<T> where T: Add<Output = T> + Default + Copy {
            fn sum<I>(iter: I) -> Self where I: Iterator<Item = Self> {
                iter.fold($Vec::default(), Add::add)
            }
        }

        impl<'a, T> Sum<&'a $Vec<T>> for $Vec<T> where T: Add<Output = T> + Default + Copy + 'a {
            fn sum<I>(iter: I) -> Self where I: Iterator<Item = &'a Self> {
                iter.copied().sum()
            }
        }
    }
}

VecN!(Vec2, 2);
VecN!(Vec3, 3);
VecN!(Vec4, 4);

/// Implements the floating point operations (length, angles, ...)
/// for $Vec<$F>
macro_rules! float_ops {
    ($Vec: ident, $n: expr, $F: ident) => {
        impl $Vec<$F> {
            /// Inner product
            pub fn dot(&self, other: &$Vec<$F>) -> $F {
                (0..$n).map(|i| self.0[i] * other.0[i]).sum()
            }

            /// Square of the length. Cheaper than `length` if only
            /// lengths are compared.
            pub fn length_square(&self) -> $F {
                self.dot(self)
            }

            pub fn length(&self) -> $F {
                self.length_square().sqrt()
            }

            /// Returns the vector scaled to length one,
            /// None for the zero vector.
            pub fn normalized(&self) -> Option<$Vec<$F>> {
                let len = self.length();
                if len == 0.0 {
                    return None;
                }
                Some(*self / len)
            }

            /// Linear interpolation towards `other`.
            /// `fact` outside of [0, 1] extrapolates.
            pub fn lerp(&self, fact: $F, other: &$Vec<$F>) -> $Vec<$F> {
                *self + (*other - *self) * fact
            }

            /// Component-wise comparison with tolerance `eps`
            pub fn approx_eq(&self, other: &$Vec<$F>, eps: $F) -> bool {
                (0..$n).all(|i| (self.0[i] - other.0[i]).abs() < eps)
            }

            /// Angle between both vectors in degrees (0 - 180).
            /// Returns None if one of them has no length.
            pub fn angle_between(&self, other: &$Vec<$F>) -> Option<$F> {
                let lengths = self.length() * other.length();
                if lengths == 0.0 {
                    return None;
                }
                let cos = (self.dot(other) / lengths).max(-1.0).min(1.0);
                Some(cos.acos().to_degrees())
            }
        }
    }
}

float_ops!(Vec2, 2, f32);
float_ops!(Vec2, 2, f64);
float_ops!(Vec3, 3, f32);
float_ops!(Vec3, 3, f64);
float_ops!(Vec4, 4, f32);
float_ops!(Vec4, 4, f64);

/// Converts the single precision vector into a double precision one.
macro_rules! widen {
    ($Vec: ident, $n: expr) => {
        impl $Vec<f32> {
            pub fn to_f64(&self) -> $Vec<f64> {
                let mut out = [0f64; $n];
                for i in 0..$n {
                    out[i] = self.0[i] as f64;
                }
                $Vec(out)
            }
        }
    }
}

widen!(Vec2, 2);
widen!(Vec3, 3);
widen!(Vec4, 4);

impl<T: Copy> Vec2<T> {
    pub fn x(&self) -> T {
        self.0[0]
    }
    pub fn y(&self) -> T {
        self.0[1]
    }
}

impl<T: Copy> Vec3<T> {
    pub fn x(&self) -> T {
        self.0[0]
    }
    pub fn y(&self) -> T {
        self.0[1]
    }
    pub fn z(&self) -> T {
        self.0[2]
    }
}

impl<T: Copy> Vec4<T> {
    pub fn x(&self) -> T {
        self.0[0]
    }
    pub fn y(&self) -> T {
        self.0[1]
    }
    pub fn z(&self) -> T {
        self.0[2]
    }
    pub fn w(&self) -> T {
        self.0[3]
    }

    /// The first three components
    pub fn xyz(&self) -> Vec3<T> {
        Vec3([self.0[0], self.0[1], self.0[2]])
    }
}
