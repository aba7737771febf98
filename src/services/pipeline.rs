use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::error::PipelineError;
use crate::models::{DeviceProfile, TransformOverrides, TransformParameters};
use crate::rendering::{
    encode, quantize, remap, resize_and_center, rotate, translate, EncodedImage, RasterBuffer,
};
use crate::services::Catalog;

/// Strategy that turns a source raster into encoded device output.
///
/// Injected per pipeline so tests and dry runs can swap the real imaging
/// work for a stand-in without any process-wide switch.
pub trait TransformBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn transform(
        &self,
        source: RasterBuffer,
        params: &TransformParameters,
    ) -> Result<EncodedImage, PipelineError>;
}

/// The real pipeline: resize, translate, rotate, quantize, remap, encode.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImagingBackend;

impl TransformBackend for ImagingBackend {
    fn name(&self) -> &'static str {
        "imaging"
    }

    fn transform(
        &self,
        source: RasterBuffer,
        params: &TransformParameters,
    ) -> Result<EncodedImage, PipelineError> {
        let buffer = resize_and_center(source, params.width(), params.height());
        let buffer = translate(buffer, params.offset_x(), params.offset_y());
        let buffer = rotate(buffer, params.rotation());

        let quantized = quantize(&buffer, params.levels(), params.dither())?;
        drop(buffer);

        let raster = remap(
            quantized,
            params.format(),
            params.bit_depth(),
            params.colormap(),
        )?;
        encode(&raster, params.format(), params.bit_depth())
    }
}

/// Ignores the source content and encodes a white canvas of the resolved
/// output size and format.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankBackend;

impl TransformBackend for BlankBackend {
    fn name(&self) -> &'static str {
        "blank"
    }

    fn transform(
        &self,
        source: RasterBuffer,
        params: &TransformParameters,
    ) -> Result<EncodedImage, PipelineError> {
        tracing::debug!(
            source_width = source.width(),
            source_height = source.height(),
            "Blank backend: discarding source content"
        );
        drop(source);

        let (width, height) = params.output_dimensions();
        let canvas = RasterBuffer::white(width, height)?;
        let quantized = quantize(&canvas, params.levels(), false)?;
        let raster = remap(
            quantized,
            params.format(),
            params.bit_depth(),
            params.colormap(),
        )?;
        encode(&raster, params.format(), params.bit_depth())
    }
}

/// Resolved parameters plus the backend that applies them.
///
/// Cheap to clone and safe to share across threads; each `process` call
/// owns its own buffers.
#[derive(Clone)]
pub struct TransformPipeline {
    params: TransformParameters,
    backend: Arc<dyn TransformBackend>,
}

impl fmt::Debug for TransformPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformPipeline")
            .field("params", &self.params)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl TransformPipeline {
    /// Pipeline with the real imaging backend.
    pub fn new(params: TransformParameters) -> Self {
        Self::with_backend(params, Arc::new(ImagingBackend))
    }

    pub fn with_backend(params: TransformParameters, backend: Arc<dyn TransformBackend>) -> Self {
        Self { params, backend }
    }

    /// Resolve parameters from overrides and an optional device profile.
    pub fn resolve(
        overrides: &TransformOverrides,
        profile: Option<&DeviceProfile>,
    ) -> Result<Self, PipelineError> {
        Ok(Self::new(TransformParameters::resolve(overrides, profile)?))
    }

    /// Resolve parameters for a catalog model.
    ///
    /// Fails with [`PipelineError::NotFound`] if the model is unknown.
    pub fn for_model(
        catalog: &Catalog,
        model: &str,
        overrides: &TransformOverrides,
    ) -> Result<Self, PipelineError> {
        let profile = catalog.profile_by_name(model)?;
        Self::resolve(overrides, Some(profile))
    }

    /// Replace the backend, keeping the parameters.
    pub fn backend(mut self, backend: Arc<dyn TransformBackend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn params(&self) -> &TransformParameters {
        &self.params
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Run every stage on `source`. Any stage failure aborts the run.
    pub fn process(&self, source: RasterBuffer) -> Result<EncodedImage, PipelineError> {
        let start = Instant::now();
        let (src_width, src_height) = source.dimensions();

        let encoded = self
            .backend
            .transform(source, &self.params)
            .map_err(|e| self.with_params(e))?;

        tracing::info!(
            backend = self.backend.name(),
            source = %format!("{src_width}x{src_height}"),
            output = %format!("{}x{}", encoded.width, encoded.height),
            format = %encoded.format,
            bit_depth = encoded.bit_depth,
            size = encoded.bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Transformed image"
        );
        Ok(encoded)
    }

    /// Decode encoded image bytes and process them.
    pub fn process_bytes(&self, bytes: &[u8]) -> Result<EncodedImage, PipelineError> {
        self.process(RasterBuffer::decode(bytes)?)
    }

    /// Read `input`, process it and write the result.
    ///
    /// Without an explicit `output` the result lands next to the input as
    /// `<stem>_processed.<ext>`. Returns the path written.
    pub fn process_file(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<(PathBuf, EncodedImage), PipelineError> {
        let source = RasterBuffer::open(input)?;
        let encoded = self.process(source)?;
        let path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| encoded.processed_path_for(input));
        encoded.write_to(&path)?;
        Ok((path, encoded))
    }

    fn with_params(&self, error: PipelineError) -> PipelineError {
        match error {
            PipelineError::TransformFailure {
                stage,
                context,
                source,
            } => PipelineError::TransformFailure {
                stage,
                context: format!("{context}; {}", self.params.describe()),
                source,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutputFormat;
    use image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;

    fn decode(encoded: &EncodedImage) -> RgbImage {
        image::load_from_memory(&encoded.bytes).unwrap().to_rgb8()
    }

    #[test]
    fn test_white_source_stays_white() {
        let pipeline = TransformPipeline::resolve(&TransformOverrides::default(), None).unwrap();
        let encoded = pipeline
            .process(RasterBuffer::white(100, 100).unwrap())
            .unwrap();

        assert_eq!((encoded.width, encoded.height), (800, 480));
        let decoded = decode(&encoded);
        assert!(decoded.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn test_rotation_swaps_output_size() {
        let overrides = TransformOverrides {
            rotation: Some(90),
            ..Default::default()
        };
        let pipeline = TransformPipeline::resolve(&overrides, None).unwrap();
        let encoded = pipeline
            .process(RasterBuffer::white(10, 10).unwrap())
            .unwrap();
        assert_eq!((encoded.width, encoded.height), (480, 800));
    }

    #[test]
    fn test_blank_backend_ignores_content() {
        let overrides = TransformOverrides {
            width: Some(40),
            height: Some(20),
            format: Some(OutputFormat::Bmp),
            ..Default::default()
        };
        let pipeline = TransformPipeline::resolve(&overrides, None)
            .unwrap()
            .backend(Arc::new(BlankBackend));
        assert_eq!(pipeline.backend_name(), "blank");

        let black = RgbImage::from_pixel(7, 3, Rgb([0, 0, 0]));
        let encoded = pipeline
            .process(RasterBuffer::from_image(black).unwrap())
            .unwrap();

        assert_eq!(encoded.format, OutputFormat::Bmp);
        assert_eq!(&encoded.bytes[0..2], b"BM");
        let decoded = decode(&encoded);
        assert_eq!(decoded.dimensions(), (40, 20));
        assert!(decoded.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn test_remap_failure_aborts() {
        let overrides = TransformOverrides {
            colors: Some(4),
            bit_depth: Some(2),
            colormap: Some(vec!["#000000".into(), "#FFFFFF".into()]),
            ..Default::default()
        };
        let pipeline = TransformPipeline::resolve(&overrides, None).unwrap();
        let err = pipeline
            .process(RasterBuffer::white(8, 8).unwrap())
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
    }

    struct FailingBackend;

    impl TransformBackend for FailingBackend {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn transform(
            &self,
            _source: RasterBuffer,
            _params: &TransformParameters,
        ) -> Result<EncodedImage, PipelineError> {
            Err(PipelineError::transform(
                crate::error::Stage::Encode,
                "test",
                std::io::Error::other("boom"),
            ))
        }
    }

    #[test]
    fn test_failure_carries_parameters() {
        let pipeline = TransformPipeline::resolve(&TransformOverrides::default(), None)
            .unwrap()
            .backend(Arc::new(FailingBackend));
        let err = pipeline
            .process(RasterBuffer::white(1, 1).unwrap())
            .unwrap_err();

        assert_eq!(err.stage(), Some(crate::error::Stage::Encode));
        assert_eq!(
            err.to_string(),
            "encode stage failed (test; 800x480 colors=2 bit_depth=1 rotation=0 offset=0,0 format=png dither=true): boom"
        );
    }
}
