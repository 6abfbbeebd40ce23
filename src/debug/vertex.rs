use crate::debug::DebugLine;

/// A debug overlay vertex: position + color.
///
/// Consecutive pairs form one segment of a line list.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DebugVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl DebugLine {
    /// Line-list vertices for this segment.
    pub fn vertices(&self) -> [DebugVertex; 2] {
        let color = self.color.to_array();
        [
            DebugVertex {
                position: self.start.to_array(),
                color,
            },
            DebugVertex {
                position: self.end.to_array(),
                color,
            },
        ]
    }
}
