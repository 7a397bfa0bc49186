use crate::catalog::ReflectorSpec;

/// A fixed-wiring reflector. Stateless, so every machine borrows the catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reflector {
    spec: &'static ReflectorSpec,
}

impl Reflector {
    pub fn new(spec: &'static ReflectorSpec) -> Self {
        Self { spec }
    }

    /// Reflects `index` back into the rotor stack. Never returns `index` itself.
    pub fn apply(&self, index: usize) -> usize {
        self.spec.wiring[index] as usize
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_reflector_b() {
        let reflector = Reflector::new(Catalog::reflector("B").unwrap());

        assert_eq!(reflector.name(), "B");
        // A <-> Y, B <-> R
        assert_eq!(reflector.apply(0), 24);
        assert_eq!(reflector.apply(24), 0);
        assert_eq!(reflector.apply(1), 17);
        assert_eq!(reflector.apply(17), 1);
    }
}
