//! Page renderer
//!
//! Draws frames into the live document: the SVG stage and the three energy
//! meters.

use web_sys::Document;

use super::svg::{pose_updates, scene_markup};
use super::{MeterWidths, meter_label, width_style};
use crate::sim::{Apparatus, Frame, FrameSink};

const STAGE_ID: &str = "animation-stage";
const COMPONENT_VIEW_ID: &str = "view-component";

pub struct DomRenderer {
    document: Document,
    /// Print the percentage inside each bar
    show_values: bool,
    /// Apparatus whose scene is currently in the stage
    scene: Option<Apparatus>,
}

impl DomRenderer {
    pub fn new(document: Document, show_values: bool) -> Self {
        Self {
            document,
            show_values,
            scene: None,
        }
    }

    /// Forget the drawn scene so the next frame rebuilds it
    pub fn invalidate(&mut self) {
        self.scene = None;
    }

    fn draw_scene(&mut self, frame: &Frame) {
        let Some(stage) = self.document.get_element_by_id(STAGE_ID) else {
            return;
        };
        if self.scene != Some(frame.apparatus) {
            stage.set_inner_html(&scene_markup(&frame.pose));
            self.scene = Some(frame.apparatus);
            log::debug!("Stage rebuilt for {}", frame.apparatus);
            return;
        }
        for update in pose_updates(&frame.pose) {
            if let Some(el) = self.document.get_element_by_id(update.element_id) {
                let _ = el.set_attribute(update.attribute, &update.value);
            }
        }
    }

    fn draw_meters(&self, frame: &Frame) {
        let widths = MeterWidths::from_energy(&frame.energy);
        for (id, width) in widths.bars() {
            if let Some(bar) = self.document.get_element_by_id(id) {
                let _ = bar.set_attribute("style", &width_style(width));
                if self.show_values {
                    bar.set_text_content(Some(&meter_label(width)));
                }
            }
        }
    }
}

impl FrameSink for DomRenderer {
    fn is_mounted(&self) -> bool {
        let view_visible = self
            .document
            .get_element_by_id(COMPONENT_VIEW_ID)
            .is_some_and(|view| !view.class_list().contains("hidden"));
        view_visible && self.document.get_element_by_id(STAGE_ID).is_some()
    }

    fn present(&mut self, frame: &Frame) {
        self.draw_scene(frame);
        self.draw_meters(frame);
    }
}
