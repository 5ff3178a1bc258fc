use super::{compose_response, SelectedImage, StyleCategory, IMAGE_PLACEHOLDER};

/// State behind the stylist view. Each operation is a single transition;
/// nothing here touches the terminal or the filesystem.
#[derive(Debug, Clone, Default)]
pub struct StylistForm {
    image: Option<SelectedImage>,
    style: StyleCategory,
    response: String,
}

impl StylistForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selected image. Earlier selections are dropped.
    pub fn select_image(&mut self, image: SelectedImage) {
        tracing::debug!(name = %image.name, bytes = image.size(), "image selected");
        self.image = Some(image);
    }

    /// Replace the selected style. The displayed response is left alone.
    pub fn select_style(&mut self, style: StyleCategory) {
        tracing::debug!(style = %style, "style selected");
        self.style = style;
    }

    /// Synthesize the response from the current image and style
    pub fn submit(&mut self) -> &str {
        self.response = compose_response(self.image.as_ref(), self.style);
        tracing::debug!(response = %self.response, "analysis submitted");
        &self.response
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    pub fn style(&self) -> StyleCategory {
        self.style
    }

    /// `None` until something has been submitted
    pub fn response(&self) -> Option<&str> {
        if self.response.is_empty() {
            None
        } else {
            Some(&self.response)
        }
    }

    /// Text for the image control
    pub fn image_label(&self) -> &str {
        self.image
            .as_ref()
            .map(|i| i.name.as_str())
            .unwrap_or(IMAGE_PLACEHOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> SelectedImage {
        SelectedImage::new(name, format!("/photos/{}", name), vec![1, 2, 3])
    }

    #[test]
    fn test_initial_state() {
        let form = StylistForm::new();
        assert!(form.image().is_none());
        assert_eq!(form.style(), StyleCategory::Casual);
        assert_eq!(form.response(), None);
        assert_eq!(form.image_label(), "Choose an image");
    }

    #[test]
    fn test_submit_each_style_without_image() {
        for style in StyleCategory::ALL {
            let mut form = StylistForm::new();
            form.select_style(style);
            form.submit();
            assert_eq!(
                form.response(),
                Some(format!("LLM response for no image with style {}", style.value()).as_str())
            );
        }
    }

    #[test]
    fn test_submit_with_image_and_default_style() {
        let mut form = StylistForm::new();
        form.select_image(image("shirt.png"));
        assert_eq!(form.submit(), "LLM response for shirt.png with style casual");
    }

    #[test]
    fn test_reselecting_replaces_image() {
        let mut form = StylistForm::new();
        form.select_image(image("shirt.png"));
        form.select_image(image("boots.jpg"));
        assert_eq!(form.image_label(), "boots.jpg");
        assert_eq!(form.image().map(|i| i.path.clone()), Some("/photos/boots.jpg".into()));
    }

    #[test]
    fn test_style_change_keeps_previous_response() {
        let mut form = StylistForm::new();
        form.submit();
        form.select_style(StyleCategory::Vintage);
        assert_eq!(form.response(), Some("LLM response for no image with style casual"));

        form.submit();
        assert_eq!(form.response(), Some("LLM response for no image with style vintage"));
    }

    #[test]
    fn test_image_change_keeps_previous_response() {
        let mut form = StylistForm::new();
        form.submit();
        form.select_image(image("hat.gif"));
        assert_eq!(form.response(), Some("LLM response for no image with style casual"));
    }
}
