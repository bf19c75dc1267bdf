use crate::dsp::chain::{blend, ChannelChain};
use crate::dsp::envelope::EnvelopeFollower;
use crate::dsp::smoother::ParameterSmoother;
use crate::types::AudioBlockMut;
use std::sync::Arc;
use tracing::{debug, info, warn};
use vt2w_core::{ConfigError, EngineSettings, ParamId, ParameterStore, DRIVE_MAX, MIX_MAX};

/// Stereo saturation engine
///
/// Reads drive and mix targets from a shared `ParameterStore` once per block,
/// smooths them per sample and runs two channel chains that share those
/// smoothed values. Block processing never allocates, blocks or fails; the
/// only fallible call is `prepare`.
pub struct Engine {
    store: Arc<ParameterStore>,
    settings: EngineSettings,
    drive: ParameterSmoother,
    /// Mix as a fraction in `[0, 1]`
    mix: ParameterSmoother,
    left: ChannelChain,
    right: ChannelChain,
    prepared: bool,
}

impl Engine {
    /// Create an engine with default settings
    pub fn new(store: Arc<ParameterStore>) -> Self {
        Self::with_settings(store, EngineSettings::default())
    }

    /// Create an engine with custom time constants.
    ///
    /// Invalid settings fall back to the defaults; `prepare` is where
    /// configuration errors are reported.
    pub fn with_settings(store: Arc<ParameterStore>, settings: EngineSettings) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                warn!("Ignoring invalid engine settings: {}", e);
                EngineSettings::default()
            }
        };

        let follower = Self::follower_for(&settings);
        let mut engine = Self {
            store,
            drive: ParameterSmoother::new(0.0),
            mix: ParameterSmoother::new(1.0),
            left: ChannelChain::new(follower),
            right: ChannelChain::new(follower),
            settings,
            prepared: false,
        };
        engine.reset_state();
        engine
    }

    /// Prepare for playback at a new sample rate and block size.
    ///
    /// Recomputes every coefficient, zeroes both envelopes and snaps the
    /// smoothers to the current targets. Called on every (re)negotiation,
    /// whether or not the format actually changed.
    pub fn prepare(&mut self, sample_rate: f64, block_size: usize) -> Result<(), ConfigError> {
        let settings = EngineSettings {
            sample_rate,
            block_size,
            ..self.settings.clone()
        };

        if let Err(e) = settings.validate() {
            warn!("Rejected engine configuration: {}", e);
            return Err(e);
        }

        self.settings = settings;
        self.reset_state();
        self.prepared = true;

        info!(
            "Engine prepared: {} Hz, {} frames per block",
            self.settings.sample_rate, self.settings.block_size
        );
        Ok(())
    }

    /// Playback stopped. Nothing needs to be freed.
    pub fn release(&mut self) {
        debug!("Engine released");
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn sample_rate(&self) -> f64 {
        self.settings.sample_rate
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<ParameterStore> {
        &self.store
    }

    /// Envelope estimates for the left and right chains
    pub fn envelopes(&self) -> [f32; 2] {
        [self.left.envelope(), self.right.envelope()]
    }

    /// Most recent smoothed drive, in `[0, 10]`
    pub fn current_drive(&self) -> f32 {
        self.drive.current()
    }

    /// Most recent smoothed mix as a fraction in `[0, 1]`
    pub fn current_mix(&self) -> f32 {
        self.mix.current()
    }

    /// Process separate left/right buffers in place.
    ///
    /// Only the frames present in both slices are processed.
    pub fn process_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        self.begin_block();

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let (drive_norm, mix) = self.next_parameters();
            *l = self.process_left(*l, drive_norm, mix);
            *r = self.process_right(*r, drive_norm, mix);
        }
    }

    /// Process a single channel in place through the left chain
    pub fn process_mono(&mut self, samples: &mut [f32]) {
        self.begin_block();

        for sample in samples.iter_mut() {
            let (drive_norm, mix) = self.next_parameters();
            *sample = self.process_left(*sample, drive_norm, mix);
        }
    }

    /// Mono input in `left`, stereo output: the right channel mirrors the
    /// left chain's output instead of running its own chain.
    pub fn process_mono_to_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        self.begin_block();

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let (drive_norm, mix) = self.next_parameters();
            *l = self.process_left(*l, drive_norm, mix);
            *r = *l;
        }
    }

    /// Process an interleaved block in place.
    ///
    /// Mono blocks run the left chain only. For more than two channels the
    /// first two are processed and the rest are left untouched.
    pub fn process_block(&mut self, block: AudioBlockMut<'_>) {
        match block.channels {
            0 => {}
            1 => self.process_mono(block.frames),
            channels => {
                self.begin_block();

                for frame in block.frames.chunks_exact_mut(channels) {
                    let (drive_norm, mix) = self.next_parameters();
                    frame[0] = self.process_left(frame[0], drive_norm, mix);
                    frame[1] = self.process_right(frame[1], drive_norm, mix);
                }
            }
        }
    }

    /// Latch the latest targets from the store
    #[inline]
    fn begin_block(&mut self) {
        self.drive.set_target(self.store.target(ParamId::Drive));
        self.mix.set_target(self.store.target(ParamId::Mix) / MIX_MAX);
    }

    /// Advance both smoothers by one sample: (normalized drive, mix fraction)
    #[inline]
    fn next_parameters(&mut self) -> (f32, f32) {
        let drive = self.drive.next();
        let mix = self.mix.next();
        (drive / DRIVE_MAX, mix)
    }

    #[inline]
    fn process_left(&mut self, dry: f32, drive_norm: f32, mix: f32) -> f32 {
        blend(dry, self.left.process(dry, drive_norm), mix)
    }

    #[inline]
    fn process_right(&mut self, dry: f32, drive_norm: f32, mix: f32) -> f32 {
        blend(dry, self.right.process(dry, drive_norm), mix)
    }

    fn follower_for(settings: &EngineSettings) -> EnvelopeFollower {
        EnvelopeFollower::new(
            settings.sample_rate,
            settings.envelope_attack_seconds,
            settings.envelope_release_seconds,
        )
    }

    fn reset_state(&mut self) {
        let sample_rate = self.settings.sample_rate;
        let smoothing = self.settings.smoothing_seconds;

        self.drive.reset(sample_rate, smoothing);
        self.mix.reset(sample_rate, smoothing);
        self.drive.snap_to(self.store.target(ParamId::Drive));
        self.mix.snap_to(self.store.target(ParamId::Mix) / MIX_MAX);

        let follower = Self::follower_for(&self.settings);
        self.left.prepare(follower);
        self.right.prepare(follower);
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("sample_rate", &self.settings.sample_rate)
            .field("prepared", &self.prepared)
            .field("drive", &self.drive.current())
            .field("mix", &self.mix.current())
            .field("envelopes", &self.envelopes())
            .finish()
    }
}
