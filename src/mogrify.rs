use super::*;
use std::sync::Arc;

/// Interpolates a query template with its values, for display only.
pub trait Renderer {
    type Error: std::error::Error + Send + Sync + 'static;

    fn render(&self, template: &str, values: &QueryValues) -> Result<String, Self::Error>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    type Error = R::Error;

    fn render(&self, template: &str, values: &QueryValues) -> Result<String, Self::Error> {
        (**self).render(template, values)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    type Error = R::Error;

    fn render(&self, template: &str, values: &QueryValues) -> Result<String, Self::Error> {
        (**self).render(template, values)
    }
}

impl<R: Renderer + ?Sized> Renderer for Arc<R> {
    type Error = R::Error;

    fn render(&self, template: &str, values: &QueryValues) -> Result<String, Self::Error> {
        (**self).render(template, values)
    }
}

/// A query template and its values, rendered on first read.
pub struct Mogrify<R = SqlRenderer> {
    template: String,
    values: QueryValues,
    renderer: R,
}

impl<R: Renderer> Mogrify<R> {
    pub fn new(template: impl Into<String>, values: QueryValues, renderer: R) -> Self {
        Mogrify {
            template: template.into(),
            values,
            renderer,
        }
    }
}

impl<R: Renderer> TextSetup for Mogrify<R> {
    fn setup(&mut self) -> Result<String, LazyError> {
        self.renderer
            .render(&self.template, &self.values)
            .map_err(|e| LazyError::Render(Box::new(e)))
    }
}

pub type LazyMogrify<R = SqlRenderer> = LazyText<Mogrify<R>>;

impl<R: Renderer> LazyMogrify<R> {
    pub fn with_renderer(template: impl Into<String>, values: QueryValues, renderer: R) -> Self {
        LazyText::new(Mogrify::new(template, values, renderer))
    }
}

impl LazyMogrify {
    pub fn from_query(template: impl Into<String>, values: QueryValues) -> Self {
        LazyText::new(Mogrify::new(template, values, SqlRenderer::default()))
    }
}
