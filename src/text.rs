use super::*;
use std::fmt;
use std::marker::PhantomData;

/// The evaluation step of a text cell.
///
/// Types that leave `setup` alone get a cell that can never be read.
pub trait TextSetup {
    fn setup(&mut self) -> Result<String, LazyError> {
        Err(LazyError::Unimplemented(std::any::type_name::<Self>()))
    }
}

/// Adapts a [`TextSetup`] to the [`Producer`] the cells evaluate.
pub struct TextProducer<S>(S);

impl<S: TextSetup> Producer for TextProducer<S> {
    type Output = String;
    type Error = LazyError;

    fn produce(&mut self) -> Result<String, LazyError> {
        self.0.setup()
    }
}

/// A lazily produced string.
///
/// `Display` shows the value, `Debug` shows it single quoted so that it stands
/// out from a literal in logs. Both evaluate the cell and print an error marker
/// when that fails; [`LazyText::value`] is the way to get at the error.
pub struct LazyText<S: TextSetup, M = Lazy<TextProducer<S>>> {
    cell: M,
    _setup: PhantomData<fn() -> S>,
}

impl<S, M> LazyText<S, M>
where
    S: TextSetup,
    M: Memoize<Producer = TextProducer<S>>,
{
    pub fn new(setup: S) -> Self {
        LazyText {
            cell: M::from_producer(TextProducer(setup)),
            _setup: PhantomData,
        }
    }

    pub fn value(&self) -> Result<&str, LazyError> {
        self.cell.get().map(String::as_str)
    }

    pub fn to_text(&self) -> Result<String, LazyError> {
        self.value().map(str::to_owned)
    }

    pub fn to_debug_text(&self) -> Result<String, LazyError> {
        self.value().map(|v| format!("'{v}'"))
    }

    pub fn is_evaluated(&self) -> bool {
        self.cell.is_evaluated()
    }
}

impl<S, M> fmt::Display for LazyText<S, M>
where
    S: TextSetup,
    M: Memoize<Producer = TextProducer<S>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Ok(v) => f.write_str(v),
            Err(e) => {
                tracing::warn!(error = %e, "cannot display lazy text");
                write!(f, "<error: {e}>")
            }
        }
    }
}

impl<S, M> fmt::Debug for LazyText<S, M>
where
    S: TextSetup,
    M: Memoize<Producer = TextProducer<S>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Ok(v) => write!(f, "'{v}'"),
            Err(e) => write!(f, "LazyText(<error: {e}>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Base;

    impl TextSetup for Base {}

    #[test]
    fn base_setup_is_unimplemented() {
        let text: LazyText<Base> = LazyText::new(Base);

        match text.value() {
            Err(LazyError::Unimplemented(name)) => assert!(name.ends_with("Base")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!text.is_evaluated());
    }

    #[test]
    fn debug_reports_failure() {
        let text: LazyText<Base> = LazyText::new(Base);

        assert!(format!("{text:?}").starts_with("LazyText(<error: "));
    }
}
