use winit::dpi::PhysicalSize;

/// Multisampled color texture resolved into the swapchain image.
pub(super) struct MsaaTarget {
    view: wgpu::TextureView,
    size: PhysicalSize<u32>,
    format: wgpu::TextureFormat,
    sample_count: u32,
}

impl MsaaTarget {
    fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
        sample_count: u32,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tricam msaa color"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        log::debug!("msaa target {}x{} ×{sample_count}", size.width, size.height);

        Self {
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            size,
            format,
            sample_count,
        }
    }

    fn matches(&self, format: wgpu::TextureFormat, size: PhysicalSize<u32>, sample_count: u32) -> bool {
        self.format == format && self.size == size && self.sample_count == sample_count
    }

    pub(super) fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Returns a target matching the given description, reusing `slot` when it
    /// already matches. `None` when multisampling is off or the size is zero.
    pub(super) fn ensure<'s>(
        slot: &'s mut Option<MsaaTarget>,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
        sample_count: u32,
    ) -> Option<&'s MsaaTarget> {
        if sample_count <= 1 || size.width == 0 || size.height == 0 {
            *slot = None;
            return None;
        }

        let stale = slot
            .as_ref()
            .is_none_or(|t| !t.matches(format, size, sample_count));
        if stale {
            *slot = Some(MsaaTarget::new(device, format, size, sample_count));
        }

        slot.as_ref()
    }
}
