//! Four-corner control-mesh distortion of one shape.
//!
//! The shape's bounding box is the undistorted mesh. Dragging a corner warps
//! every stored point bilinearly; the result replaces the object on finish.

use drawkit_core::{ObjectId, Result, TopologyError};

use crate::bbox::{BBox, Hotspot};
use crate::geometry::bilinear;
use crate::model::{Graphical, Point};
use crate::scene::{Graphic, ObjectRef};

#[derive(Debug, Clone, PartialEq)]
pub struct Distortion {
    pub target: ObjectRef,
    pub id: ObjectId,
    source: BBox,
    /// `[sw, se, ne, nw]`
    corners: [Point; 4],
}

impl Distortion {
    /// Starts a distortion of `graphic`, which must be a path or symmetric path.
    pub fn new(target: ObjectRef, id: ObjectId, graphic: &Graphic) -> Result<Self> {
        if !graphic.is_editable_path() {
            return Err(TopologyError::Unsupported {
                operation: "distort",
                kind: graphic.kind_name(),
            }
            .into());
        }
        let source = graphic.bounds();
        let corners = mesh(&source);
        Ok(Self {
            target,
            id,
            source,
            corners,
        })
    }

    pub fn source(&self) -> BBox {
        self.source
    }

    pub fn corners(&self) -> [Point; 4] {
        self.corners
    }

    /// Moves one mesh corner. Edge hotspots are ignored.
    pub fn move_corner(&mut self, corner: Hotspot, to: Point) -> bool {
        let slot = match corner {
            Hotspot::SouthWest => 0,
            Hotspot::SouthEast => 1,
            Hotspot::NorthEast => 2,
            Hotspot::NorthWest => 3,
            _ => return false,
        };
        self.corners[slot] = to;
        true
    }

    pub fn is_identity(&self) -> bool {
        self.corners == mesh(&self.source)
    }

    /// Maps a point of the source box onto the distorted mesh.
    pub fn warp_point(&self, p: Point) -> Point {
        let w = self.source.width();
        let h = self.source.height();
        let u = if w > 0.0 { (p.x - self.source.min.x) / w } else { 0.0 };
        let v = if h > 0.0 { (p.y - self.source.min.y) / h } else { 0.0 };
        bilinear(&self.corners, u, v)
    }

    /// The distorted shape. A symmetric path is flattened into a plain path,
    /// since the warp does not preserve its mirror axis.
    pub fn preview(&self, graphic: &Graphic) -> Result<Graphic> {
        let mut out = match graphic {
            Graphic::Symmetric(s) => Graphic::Path(s.to_path()?),
            Graphic::Path(_) => graphic.clone(),
            other => {
                return Err(TopologyError::Unsupported {
                    operation: "distort",
                    kind: other.kind_name(),
                }
                .into())
            }
        };
        out.map_points(&mut |p| self.warp_point(p));
        Ok(out)
    }
}

fn mesh(source: &BBox) -> [Point; 4] {
    [
        Hotspot::SouthWest.position(source),
        Hotspot::SouthEast.position(source),
        Hotspot::NorthEast.position(source),
        Hotspot::NorthWest.position(source),
    ]
}
