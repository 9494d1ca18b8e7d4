use image::Rgba;

pub(crate) struct Colours {
    pub background: Rgba<u8>,
    pub header: Rgba<u8>,
    pub text: Rgba<u8>,
    pub highlight: Rgba<u8>,
    pub panel: Rgba<u8>,
    pub border: Rgba<u8>,
    pub bar: Rgba<u8>,
}

impl Default for Colours {
    fn default() -> Self {
        Self {
            background: Rgba([28, 30, 38, 255]), // Charcoal - window background
            header: Rgba([136, 192, 208, 255]),  // Frost blue - for the title line
            text: Rgba([236, 239, 244, 255]),    // Snow white - resting label text
            highlight: Rgba([235, 203, 139, 255]), // Sand yellow - update pulse
            panel: Rgba([59, 66, 82, 255]),      // Slate - label boxes and bar track
            border: Rgba([136, 192, 208, 255]),  // Frost blue - label borders
            bar: Rgba([136, 192, 208, 255]),     // Frost blue - progress fill
        }
    }
}
