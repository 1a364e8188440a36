use super::model::Model;

impl<T: Send + 'static> Model<T> {
    /// Renders the field with the popup stacked above or below it.
    pub fn view(&self) -> String {
        self.overlay.compose(&self.field.view())
    }

    /// Renders only the field. Pair with [`Model::paint_over`] when the popup
    /// should float over the rest of the screen instead of taking up rows.
    pub fn field_view(&self) -> String {
        self.field.view()
    }

    /// Draws the popup over a full-screen view at the anchored position set
    /// with [`Model::set_anchor`].
    pub fn paint_over(&self, screen: &str) -> String {
        self.overlay.paint(screen)
    }
}
