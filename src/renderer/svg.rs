//! SVG scenes for each apparatus
//!
//! `scene_markup` draws the whole stage once; `pose_updates` lists the
//! attribute changes that move the parts on every frame. Both take the same
//! pose so the first picture and later updates line up.

use std::fmt::Write;

use glam::Vec2;

use crate::consts::VIEWPORT_SIZE;
use crate::sim::PoseFrame;
use crate::sim::laws::{
    CLIMBER_FRAME_HEIGHT, ROUNDABOUT_RADIUS, SLIDE_FOOT, SLIDE_RUN, SWING_PIVOT,
};

/// One attribute to set on one element
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeUpdate {
    pub element_id: &'static str,
    pub attribute: &'static str,
    pub value: String,
}

impl AttributeUpdate {
    fn new(element_id: &'static str, attribute: &'static str, value: String) -> Self {
        Self {
            element_id,
            attribute,
            value,
        }
    }
}

const SEAT_WIDTH: f32 = 40.0;
const BALL_RADIUS: f32 = 10.0;
const KID_RADIUS: f32 = 9.0;

#[inline]
fn num(v: f32) -> String {
    format!("{:.2}", v)
}

fn slide_path(top: Vec2) -> String {
    format!(
        "M{} {} L{} {} L{} {}",
        num(SLIDE_FOOT.x),
        num(SLIDE_FOOT.y),
        num(top.x),
        num(top.y),
        num(SLIDE_FOOT.x + SLIDE_RUN),
        num(SLIDE_FOOT.y)
    )
}

fn rotate(rotation: f32, center: Vec2) -> String {
    format!(
        "rotate({} {} {})",
        num(rotation.to_degrees()),
        num(center.x),
        num(center.y)
    )
}

/// Attribute changes that bring the stage to `pose`
pub fn pose_updates(pose: &PoseFrame) -> Vec<AttributeUpdate> {
    match *pose {
        PoseFrame::Swing { seat, .. } => vec![
            AttributeUpdate::new("swing-rope", "x2", num(seat.x)),
            AttributeUpdate::new("swing-rope", "y2", num(seat.y)),
            AttributeUpdate::new("swing-seat", "x", num(seat.x - SEAT_WIDTH / 2.0)),
            AttributeUpdate::new("swing-seat", "y", num(seat.y)),
        ],
        PoseFrame::Slide { top, ball, .. } => vec![
            AttributeUpdate::new("slide-frame", "d", slide_path(top)),
            AttributeUpdate::new("player-ball", "cx", num(ball.x)),
            AttributeUpdate::new("player-ball", "cy", num(ball.y - BALL_RADIUS)),
        ],
        PoseFrame::Seesaw { left, right, .. } => vec![
            AttributeUpdate::new("seesaw-plank", "x1", num(left.x)),
            AttributeUpdate::new("seesaw-plank", "y1", num(left.y)),
            AttributeUpdate::new("seesaw-plank", "x2", num(right.x)),
            AttributeUpdate::new("seesaw-plank", "y2", num(right.y)),
            AttributeUpdate::new("seesaw-kid-left", "cx", num(left.x)),
            AttributeUpdate::new("seesaw-kid-left", "cy", num(left.y - KID_RADIUS)),
            AttributeUpdate::new("seesaw-kid-right", "cx", num(right.x)),
            AttributeUpdate::new("seesaw-kid-right", "cy", num(right.y - KID_RADIUS)),
        ],
        PoseFrame::Roundabout {
            hub,
            rider,
            rotation,
        } => vec![
            AttributeUpdate::new("roundabout-disc", "transform", rotate(rotation, hub)),
            AttributeUpdate::new("roundabout-rider", "cx", num(rider.x)),
            AttributeUpdate::new("roundabout-rider", "cy", num(rider.y)),
        ],
        PoseFrame::Climber { climber, .. } => vec![
            AttributeUpdate::new("climber-kid", "cx", num(climber.x)),
            AttributeUpdate::new("climber-kid", "cy", num(climber.y - KID_RADIUS)),
        ],
    }
}

/// Full stage markup for the apparatus of `pose`, drawn at `pose`
pub fn scene_markup(pose: &PoseFrame) -> String {
    let size = VIEWPORT_SIZE;
    let mut svg = format!(
        r#"<svg viewBox="0 0 {size} {size}" width="{size}" height="{size}">"#
    );
    // Writing to a String cannot fail
    let _ = match *pose {
        PoseFrame::Swing { pivot, seat, .. } => write!(
            svg,
            concat!(
                r##"<line x1="{bx1}" y1="{py}" x2="{bx2}" y2="{py}" stroke="#5d4037" stroke-width="5"/>"##,
                r##"<line id="swing-rope" x1="{px}" y1="{py}" x2="{sx}" y2="{sy}" stroke="#333" stroke-width="2"/>"##,
                r##"<rect id="swing-seat" x="{seat_x}" y="{sy}" width="{w}" height="10" fill="#2196F3"/>"##,
            ),
            bx1 = num(SWING_PIVOT.x - 50.0),
            bx2 = num(SWING_PIVOT.x + 50.0),
            px = num(pivot.x),
            py = num(pivot.y),
            sx = num(seat.x),
            sy = num(seat.y),
            seat_x = num(seat.x - SEAT_WIDTH / 2.0),
            w = num(SEAT_WIDTH),
        ),
        PoseFrame::Slide { top, ball, .. } => write!(
            svg,
            concat!(
                r##"<path id="slide-frame" d="{d}" fill="none" stroke="#5d4037" stroke-width="5"/>"##,
                r##"<circle id="player-ball" cx="{bx}" cy="{by}" r="{r}" fill="#FF9800"/>"##,
            ),
            d = slide_path(top),
            bx = num(ball.x),
            by = num(ball.y - BALL_RADIUS),
            r = num(BALL_RADIUS),
        ),
        PoseFrame::Seesaw {
            pivot, left, right, ..
        } => write!(
            svg,
            concat!(
                r##"<polygon points="{p1} {p2} {p3}" fill="#5d4037"/>"##,
                r##"<line id="seesaw-plank" x1="{lx}" y1="{ly}" x2="{rx}" y2="{ry}" stroke="#8d6e63" stroke-width="6"/>"##,
                r##"<circle id="seesaw-kid-left" cx="{lx}" cy="{lky}" r="{kr}" fill="#2196F3"/>"##,
                r##"<circle id="seesaw-kid-right" cx="{rx}" cy="{rky}" r="{kr}" fill="#E91E63"/>"##,
            ),
            p1 = format!("{},{}", num(pivot.x), num(pivot.y)),
            p2 = format!("{},{}", num(pivot.x - 15.0), num(pivot.y + 25.0)),
            p3 = format!("{},{}", num(pivot.x + 15.0), num(pivot.y + 25.0)),
            lx = num(left.x),
            ly = num(left.y),
            rx = num(right.x),
            ry = num(right.y),
            lky = num(left.y - KID_RADIUS),
            rky = num(right.y - KID_RADIUS),
            kr = num(KID_RADIUS),
        ),
        PoseFrame::Roundabout {
            hub,
            rider,
            rotation,
        } => write!(
            svg,
            concat!(
                r##"<g id="roundabout-disc" transform="{t}">"##,
                r##"<circle cx="{hx}" cy="{hy}" r="{rad}" fill="#FFC107" stroke="#5d4037" stroke-width="3"/>"##,
                r##"<line x1="{l1}" y1="{hy}" x2="{l2}" y2="{hy}" stroke="#5d4037" stroke-width="2"/>"##,
                r##"<line x1="{hx}" y1="{t1}" x2="{hx}" y2="{t2}" stroke="#5d4037" stroke-width="2"/>"##,
                r##"</g>"##,
                r##"<circle id="roundabout-rider" cx="{rx}" cy="{ry}" r="{kr}" fill="#2196F3"/>"##,
            ),
            t = rotate(rotation, hub),
            hx = num(hub.x),
            hy = num(hub.y),
            rad = num(ROUNDABOUT_RADIUS),
            l1 = num(hub.x - ROUNDABOUT_RADIUS),
            l2 = num(hub.x + ROUNDABOUT_RADIUS),
            t1 = num(hub.y - ROUNDABOUT_RADIUS),
            t2 = num(hub.y + ROUNDABOUT_RADIUS),
            rx = num(rider.x),
            ry = num(rider.y),
            kr = num(KID_RADIUS),
        ),
        PoseFrame::Climber { base, climber, .. } => {
            // Two uprights and five rungs
            let top = base.y - CLIMBER_FRAME_HEIGHT;
            let (left, right) = (base.x - 30.0, base.x + 30.0);
            let mut frame = String::new();
            for x in [left, right] {
                let _ = write!(
                    frame,
                    r##"<line x1="{x}" y1="{y1}" x2="{x}" y2="{y2}" stroke="#5d4037" stroke-width="4"/>"##,
                    x = num(x),
                    y1 = num(top),
                    y2 = num(base.y),
                );
            }
            for rung in 0..5 {
                let y = top + CLIMBER_FRAME_HEIGHT * rung as f32 / 4.0;
                let _ = write!(
                    frame,
                    r##"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="#8d6e63" stroke-width="3"/>"##,
                    x1 = num(left),
                    x2 = num(right),
                    y = num(y),
                );
            }
            write!(
                svg,
                r##"{frame}<circle id="climber-kid" cx="{cx}" cy="{cy}" r="{kr}" fill="#2196F3"/>"##,
                cx = num(climber.x),
                cy = num(climber.y - KID_RADIUS),
                kr = num(KID_RADIUS),
            )
        }
    };
    svg.push_str("</svg>");
    svg
}
