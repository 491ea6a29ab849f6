use complex_rs::complex::Complex;

/// Values for the single-letter variables of a formula.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: Vec<(char, Complex)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn with(mut self, name: char, value: Complex) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: char, value: Complex) {
        match self.values.iter_mut().find(|(bound, _)| *bound == name) {
            Some(entry) => entry.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn get(&self, name: char) -> Option<Complex> {
        self.values
            .iter()
            .find(|(bound, _)| *bound == name)
            .map(|(_, value)| *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_existing_value() {
        let mut bindings = Bindings::new().with('x', Complex::new(1.0, 0.0));
        bindings.set('x', Complex::new(2.0, 0.0));
        assert_eq!(bindings.get('x'), Some(Complex::new(2.0, 0.0)));
        assert_eq!(bindings.get('y'), None);
    }
}
