use serde::Serialize;

/// Element that receives the dashboard greeting
pub const WELCOME_ELEMENT: &str = "welcomeText";

/// User-facing sink for blocking alerts, page navigation and text updates.
///
/// The client logic never prints or redirects on its own; everything the
/// user would see goes through a surface.
pub trait Surface {
    fn alert(&mut self, message: &str);

    fn navigate(&mut self, page: &str);

    fn set_text(&mut self, element: &str, text: &str);
}

/// One thing that happened on a surface, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SurfaceEvent {
    Alert { message: String },
    Navigate { page: String },
    SetText { element: String, text: String },
}

/// Surface that keeps every event for later inspection or output
#[derive(Debug, Default, Clone)]
pub struct RecordedSurface {
    events: Vec<SurfaceEvent>,
}

impl RecordedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    pub fn alerts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Alert { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Navigate { page } => Some(page.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Latest text written to an element
    pub fn text_of(&self, element: &str) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::SetText { element: el, text } if el == element => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordedSurface {
    fn alert(&mut self, message: &str) {
        self.events.push(SurfaceEvent::Alert { message: message.to_string() });
    }

    fn navigate(&mut self, page: &str) {
        self.events.push(SurfaceEvent::Navigate { page: page.to_string() });
    }

    fn set_text(&mut self, element: &str, text: &str) {
        self.events.push(SurfaceEvent::SetText {
            element: element.to_string(),
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_events_in_order() {
        let mut surface = RecordedSurface::new();
        surface.alert("Not authorized!");
        surface.navigate("index.html");
        surface.set_text(WELCOME_ELEMENT, "Welcome A B");
        surface.set_text(WELCOME_ELEMENT, "Welcome C D");

        assert_eq!(surface.events().len(), 4);
        assert_eq!(surface.alerts(), vec!["Not authorized!"]);
        assert_eq!(surface.navigations(), vec!["index.html"]);
        assert_eq!(surface.text_of(WELCOME_ELEMENT), Some("Welcome C D"));
        assert_eq!(surface.text_of("other"), None);
    }

    #[test]
    fn events_serialize_with_tag() {
        let event = SurfaceEvent::Navigate { page: "doctor.html".into() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "navigate");
        assert_eq!(json["page"], "doctor.html");
    }
}
