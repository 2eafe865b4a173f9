//! # Uniform Bindings
//!
//! GPU buffers and bind groups for the two uniform blocks in [`crate::uniform_buffer`].
//!
//! - [`UniformBinding`] holds the single [`FrameUniform`] at `@group(0)`.
//! - [`ObjectBinding`] holds one [`ObjectUniform`] per cuboid at `@group(1)`, laid out at a
//!   fixed stride so each draw can select its slot with a dynamic offset. The stride is the
//!   block size rounded up to the device's `min_uniform_buffer_offset_alignment`. The buffer
//!   grows, never shrinks, when a frame has more cuboids than it has slots for.
//!
//! ## Example Usage
//!
//! ```ignore
//! let mut objects = ObjectBinding::new(&device, 512);
//! objects.update_buffer(&device, &queue, &uniforms);
//! render_pass.set_bind_group(1, &objects.bind_group, &[objects.offset(3)]);
//! ```
//!
//! The slot layout itself ([`object_stride`], [`pack_objects`]) is plain arithmetic and is
//! tested without a device.

// Binding sizes must be non-zero; the object binding declares exactly one block.
use std::num::NonZeroU64;

// The `#[repr(C)]` blocks these buffers carry, as bytes via `bytemuck`.
use crate::uniform_buffer::{FrameUniform, ObjectUniform};

/// Bytes in one [`ObjectUniform`], before alignment padding.
const OBJECT_SIZE: u64 = std::mem::size_of::<ObjectUniform>() as u64;

/// The per-frame uniform buffer and its bind group.
///
/// # Fields
///
/// - `buffer`: holds one [`FrameUniform`], rewritten with `queue.write_buffer` each frame.
/// - `bind_group`: bound at `@group(0)` for both shader stages.
/// - `bind_group_layout`: used when building the pipeline layout.
pub struct UniformBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl UniformBinding {
    /// Creates the buffer initialized to [`FrameUniform::default`].
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Frame Uniform Buffer"),
                contents: bytemuck::cast_slice(&[FrameUniform::default()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("frame_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("frame_bind_group"),
        });

        Self {
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    /// Replaces the whole block. The write lands before the next submitted command buffer.
    pub fn update_buffer(&self, queue: &wgpu::Queue, uniform: FrameUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]))
    }
}

/// Per-cuboid uniforms addressed by dynamic offset.
///
/// # Fields
///
/// - `buffer`: `capacity` slots of `stride` bytes each.
/// - `bind_group`: bound at `@group(1)`, with a window of one block per draw.
/// - `bind_group_layout`: kept so the bind group can be rebuilt when the buffer grows.
/// - `stride`: [`object_stride`] for this device.
/// - `capacity`: slots currently allocated.
pub struct ObjectBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
    stride: u64,
    capacity: usize,
}

impl ObjectBinding {
    /// Creates a buffer with room for `capacity` objects (at least one).
    pub fn new(device: &wgpu::Device, capacity: usize) -> Self {
        let stride = object_stride(device.limits().min_uniform_buffer_offset_alignment);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(OBJECT_SIZE),
                },
                count: None,
            }],
            label: Some("object_bind_group_layout"),
        });

        let capacity = capacity.max(1);
        let (buffer, bind_group) = Self::allocate(device, &bind_group_layout, stride, capacity);

        Self {
            buffer,
            bind_group,
            bind_group_layout,
            stride,
            capacity,
        }
    }

    /// Creates a buffer of `capacity` slots and a bind group over its first slot.
    fn allocate(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        capacity: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Uniform Buffer"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(OBJECT_SIZE),
                }),
            }],
            label: Some("object_bind_group"),
        });

        (buffer, bind_group)
    }

    /// Dynamic offset of slot `index`.
    pub fn offset(&self, index: usize) -> wgpu::DynamicOffset {
        (index as u64 * self.stride) as wgpu::DynamicOffset
    }

    /// Writes all objects in one upload, growing the buffer first if needed.
    pub fn update_buffer(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        objects: &[ObjectUniform],
    ) {
        if objects.is_empty() {
            return;
        }
        if objects.len() > self.capacity {
            let capacity = objects.len().next_power_of_two();
            log::debug!(
                "Growing object uniforms from {} to {capacity} slots",
                self.capacity
            );
            let (buffer, bind_group) =
                Self::allocate(device, &self.bind_group_layout, self.stride, capacity);
            self.buffer = buffer;
            self.bind_group = bind_group;
            self.capacity = capacity;
        }
        queue.write_buffer(&self.buffer, 0, &pack_objects(objects, self.stride));
    }
}

/// Size of one object slot: the block size rounded up to the offset alignment.
pub fn object_stride(min_offset_alignment: u32) -> u64 {
    wgpu::util::align_to(OBJECT_SIZE, u64::from(min_offset_alignment.max(1)))
}

/// Lays `objects` out back to back at `stride` bytes apart.
pub fn pack_objects(objects: &[ObjectUniform], stride: u64) -> Vec<u8> {
    let stride = stride as usize;
    let mut bytes = vec![0; objects.len() * stride];
    for (slot, object) in bytes.chunks_exact_mut(stride).zip(objects) {
        slot[..OBJECT_SIZE as usize].copy_from_slice(bytemuck::bytes_of(object));
    }
    bytes
}
