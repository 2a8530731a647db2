use num::Float;

/// 値域 (min, max) を保持して 0.0 - 1.0 へ線形変換する
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax<N>
where
    N: Float,
{
    pub min: N,
    pub max: N,
}

impl<N> MinMax<N>
where
    N: Float,
{
    /// Fit the range over `values`, NaN is ignored.
    /// Returns `None` if there is nothing to fit.
    pub fn fit<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = N>,
    {
        let mut iter = values.into_iter().filter(|v| !v.is_nan());
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }

    /// max == min; every value would map to 0
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    #[inline]
    pub fn scale(&self, value: N) -> N {
        if self.is_degenerate() || value.is_nan() {
            return N::zero();
        }
        (value - self.min) / (self.max - self.min)
    }
}

/// Rescale `values` in place to `[0, 1]`.
/// A constant column becomes all zeros.
pub fn min_max_scale<N>(values: &mut [N]) -> Option<MinMax<N>>
where
    N: Float,
{
    let range = MinMax::fit(values.iter().copied())?;
    for v in values.iter_mut() {
        *v = range.scale(*v);
    }
    Some(range)
}
