quantity!(Hours, "h", 0);
quantity!(Years, "yr", 1);

impl Hours {
    /// Dispatch resolution: every demand record covers one hour.
    pub const ONE: Self = Self(1.0);
}
