//! Host audio pull interface
//!
//! The host asks a sound source for one interleaved stereo buffer per emulated
//! frame, or tells it that nothing was produced this frame.

/// Common interface for frame-based sound sources
///
/// # Example
///
/// ```
/// use huc6280_psg::{Psg, SoundProvider};
///
/// fn render_frame<S: SoundProvider>(source: &mut S, samples_per_frame: usize) -> Vec<i16> {
///     let mut buffer = vec![0i16; samples_per_frame * 2];
///     source.get_samples(&mut buffer);
///     buffer
/// }
///
/// let mut psg = Psg::new();
/// psg.begin_frame(0);
/// psg.end_frame(119_318);
/// let frame = render_frame(&mut psg, 735);
/// assert!(frame.iter().all(|&s| s == 0));
/// ```
pub trait SoundProvider {
    /// Mix the current frame into an interleaved stereo buffer (left, right, left, ...)
    ///
    /// Output is added to whatever the buffer already holds so several
    /// sources can share one buffer.
    fn get_samples(&mut self, samples: &mut [i16]);

    /// Declare that no audio is wanted for this frame
    fn discard_samples(&mut self);

    /// Output amplitude ceiling
    fn max_volume(&self) -> i16;

    /// Change the output amplitude ceiling
    fn set_max_volume(&mut self, max_volume: i16);
}
