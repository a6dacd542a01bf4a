//! Views over caller-owned camera planes.
//!
//! Camera layers hand over three separate planes (Y, U, V) that share one
//! row stride and one chroma pixel stride. Rows may be padded past the
//! visible width, and on most devices U and V are two offsets into the same
//! interleaved allocation (pixel stride 2). The views here carry their
//! lengths, and [`CameraFrame::new`] checks every byte the assembler will
//! touch before any of it is read.

use edgeview_core::{EdgeViewError, FrameDimensions, Plane, Result};

/// The three source planes of a YUV 4:2:0 camera frame.
#[derive(Debug, Clone, Copy)]
pub struct YuvPlanes<'a> {
    pub y: &'a [u8],
    pub u: &'a [u8],
    pub v: &'a [u8],
}

impl<'a> YuvPlanes<'a> {
    pub fn new(y: &'a [u8], u: &'a [u8], v: &'a [u8]) -> Self {
        Self { y, u, v }
    }

    /// Build plane views from raw addresses handed across a foreign call
    /// boundary.
    ///
    /// A null address means the caller could not resolve the buffer and is
    /// reported as [`EdgeViewError::UnavailableBuffer`].
    ///
    /// # Safety
    ///
    /// Every non-null pointer must be valid for reads of its length for the
    /// whole lifetime `'a`, and the memory must not be written during that
    /// time.
    #[allow(unsafe_code)]
    pub unsafe fn from_raw_parts(
        y: (*const u8, usize),
        u: (*const u8, usize),
        v: (*const u8, usize),
    ) -> Result<Self> {
        unsafe fn view<'b>(plane: Plane, (ptr, len): (*const u8, usize)) -> Result<&'b [u8]> {
            if ptr.is_null() {
                return Err(EdgeViewError::UnavailableBuffer(plane));
            }
            // SAFETY: non-null, and the caller guarantees `len` readable bytes.
            Ok(unsafe { std::slice::from_raw_parts(ptr, len) })
        }

        // SAFETY: forwarded from this function's contract.
        unsafe {
            Ok(Self {
                y: view(Plane::Y, y)?,
                u: view(Plane::U, u)?,
                v: view(Plane::V, v)?,
            })
        }
    }

    fn plane(&self, plane: Plane) -> &'a [u8] {
        match plane {
            Plane::Y => self.y,
            Plane::U => self.u,
            Plane::V => self.v,
        }
    }
}

/// A validated camera frame: plane views plus the stride metadata needed to
/// walk them.
#[derive(Debug, Clone, Copy)]
pub struct CameraFrame<'a> {
    planes: YuvPlanes<'a>,
    pixel_stride: usize,
    row_stride: usize,
    dims: FrameDimensions,
}

impl<'a> CameraFrame<'a> {
    /// Validate strides and plane lengths against the frame size.
    pub fn new(
        planes: YuvPlanes<'a>,
        pixel_stride: usize,
        row_stride: usize,
        dims: FrameDimensions,
    ) -> Result<Self> {
        if row_stride < dims.width_usize() {
            return Err(EdgeViewError::InvalidStride(format!(
                "row stride {} is narrower than width {}",
                row_stride, dims.width
            )));
        }
        if pixel_stride == 0 {
            return Err(EdgeViewError::InvalidStride(
                "pixel stride must be at least 1".to_string(),
            ));
        }

        let overflow = || {
            EdgeViewError::InvalidStride(format!(
                "strides {}/{} overflow for a {} frame",
                pixel_stride, row_stride, dims
            ))
        };

        let luma_required = (dims.height_usize() - 1)
            .checked_mul(row_stride)
            .and_then(|n| n.checked_add(dims.width_usize()))
            .ok_or_else(overflow)?;
        check_len(&planes, Plane::Y, luma_required)?;

        let (rows, cols) = (dims.chroma_rows(), dims.chroma_cols());
        if rows > 0 && cols > 0 {
            let chroma_required = (rows - 1)
                .checked_mul(row_stride)
                .and_then(|n| n.checked_add((cols - 1).checked_mul(pixel_stride)?))
                .and_then(|n| n.checked_add(1))
                .ok_or_else(overflow)?;
            check_len(&planes, Plane::U, chroma_required)?;
            check_len(&planes, Plane::V, chroma_required)?;
        }

        Ok(Self {
            planes,
            pixel_stride,
            row_stride,
            dims,
        })
    }

    /// Validate signed boundary parameters and build the frame.
    pub fn from_boundary(
        planes: YuvPlanes<'a>,
        pixel_stride: i32,
        row_stride: i32,
        width: i32,
        height: i32,
    ) -> Result<Self> {
        let dims = FrameDimensions::from_signed(i64::from(width), i64::from(height))?;
        let pixel_stride = usize::try_from(pixel_stride).map_err(|_| {
            EdgeViewError::InvalidStride(format!("negative pixel stride {}", pixel_stride))
        })?;
        let row_stride = usize::try_from(row_stride).map_err(|_| {
            EdgeViewError::InvalidStride(format!("negative row stride {}", row_stride))
        })?;
        Self::new(planes, pixel_stride, row_stride, dims)
    }

    #[inline]
    pub fn planes(&self) -> &YuvPlanes<'a> {
        &self.planes
    }

    #[inline]
    pub fn pixel_stride(&self) -> usize {
        self.pixel_stride
    }

    #[inline]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    #[inline]
    pub fn dimensions(&self) -> FrameDimensions {
        self.dims
    }
}

fn check_len(planes: &YuvPlanes<'_>, plane: Plane, required: usize) -> Result<()> {
    let actual = planes.plane(plane).len();
    if actual < required {
        return Err(EdgeViewError::BufferTooSmall {
            plane,
            required,
            actual,
        });
    }
    Ok(())
}
