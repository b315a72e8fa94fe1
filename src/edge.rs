use derivative::Derivative;

/// One directional record of an undirected edge.  The graph stores two of
/// these per edge, `from -> to` and `to -> from`, with equal weights.
///
/// The bridge flag is metadata and takes no part in equality.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "V: Clone, W: Clone"),
    Debug(bound = "V: std::fmt::Debug, W: std::fmt::Debug"),
    PartialEq(bound = "V: PartialEq, W: PartialEq")
)]
pub struct Edge<V, W> {
    from: V,
    to: V,
    weight: W,
    #[derivative(PartialEq = "ignore")]
    is_bridge: bool,
}

impl<V, W> Edge<V, W> {
    pub fn new(from: V, to: V, weight: W) -> Self {
        Self {
            from,
            to,
            weight,
            is_bridge: false,
        }
    }

    pub fn from(&self) -> &V {
        &self.from
    }

    pub fn to(&self) -> &V {
        &self.to
    }

    pub fn weight(&self) -> &W {
        &self.weight
    }

    pub fn is_bridge(&self) -> bool {
        self.is_bridge
    }

    pub fn set_weight(&mut self, weight: W) {
        self.weight = weight;
    }

    pub fn set_bridge(&mut self, is_bridge: bool) {
        self.is_bridge = is_bridge;
    }

    /// Returns the record for the opposite direction, carrying the same
    /// weight and bridge flag.
    pub fn reversed(&self) -> Self
    where
        V: Clone,
        W: Clone,
    {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            weight: self.weight.clone(),
            is_bridge: self.is_bridge,
        }
    }
}
