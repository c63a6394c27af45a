//! Slope-limited altitude smoothing.
//!
//! The smoother finds the peaks of an altitude sequence, computes the
//! slope between each consecutive peak pair, and rewrites the samples
//! inside any interval whose slope magnitude exceeds the configured
//! bound. A sample is only ever raised above its incoming value, so a
//! profile that cleared the terrain before smoothing still clears it
//! afterwards.

use log::debug;
use raster::C;

/// A recorded local maximum of an altitude sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Peak {
    index: usize,
    value: C,
}

/// Limits the per-sample altitude change of `values` to
/// `max_height_diff`, in place.
///
/// Sequences shorter than two samples are left untouched. The
/// operation is idempotent once every peak-to-peak slope is within
/// the bound.
pub fn limit_slopes(values: &mut [C], max_height_diff: C) {
    if values.len() < 2 {
        return;
    }

    let peaks = find_peaks(values);
    let slopes = peak_slopes(&peaks);
    debug!("smoothing; peaks: {peaks:?}, slopes: {slopes:?}");

    forward_pass(values, &peaks, &slopes, max_height_diff);
    backward_pass(values, &peaks, &slopes, max_height_diff);
}

/// Collects the peaks of `values` in a single left-to-right scan.
///
/// A strictly increasing run keeps replacing the last recorded peak
/// with its current top. The first and last samples are implicit
/// peaks. A flat sample ends any active rise and descending runs are
/// never recorded, so only ascending extrema appear between the
/// endpoints.
fn find_peaks(values: &[C]) -> Vec<Peak> {
    let mut peaks = vec![Peak {
        index: 0,
        value: values[0],
    }];
    let mut rising = false;

    for (i, &value) in values.iter().enumerate().take(values.len() - 1).skip(1) {
        if value > values[i - 1] {
            if rising {
                peaks.pop();
            }
            peaks.push(Peak { index: i, value });
            rising = true;
        } else {
            rising = false;
        }
    }

    peaks.push(Peak {
        index: values.len() - 1,
        value: values[values.len() - 1],
    });
    peaks
}

/// Returns the altitude change per sample between each consecutive
/// peak pair.
#[allow(clippy::cast_precision_loss)]
fn peak_slopes(peaks: &[Peak]) -> Vec<C> {
    peaks
        .windows(2)
        .map(|pair| (pair[1].value - pair[0].value) / (pair[1].index - pair[0].index) as C)
        .collect()
}

/// Walks every descending peak interval left to right, pulling each
/// sample up toward its predecessor's glide slope.
///
/// A sample is rewritten only when the candidate exceeds its current
/// value; the terrain-clearance floor established by path building is
/// never undercut.
fn forward_pass(values: &mut [C], peaks: &[Peak], slopes: &[C], max_height_diff: C) {
    for (i, &slope) in slopes.iter().enumerate() {
        if slope >= 0.0 {
            continue;
        }
        for j in peaks[i].index + 1..=peaks[i + 1].index {
            let candidate = if slope < -max_height_diff {
                values[j - 1] - max_height_diff
            } else {
                values[j - 1] + slope
            };
            if candidate > values[j] {
                values[j] = candidate;
            }
        }
    }
}

/// Walks every ascending peak interval right to left, mirroring the
/// forward pass.
///
/// Both clamp branches subtract from the successor, so this pass only
/// ever raises samples.
fn backward_pass(values: &mut [C], peaks: &[Peak], slopes: &[C], max_height_diff: C) {
    for (i, &slope) in slopes.iter().enumerate().rev() {
        if slope < 0.0 {
            continue;
        }
        for j in (peaks[i].index..peaks[i + 1].index).rev() {
            let candidate = if slope > max_height_diff {
                values[j + 1] - max_height_diff
            } else {
                values[j + 1] - slope
            };
            if candidate > values[j] {
                values[j] = candidate;
            }
        }
    }
}
