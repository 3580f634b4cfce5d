// dcprip-core/tests/common/mod.rs
//
// Fixture builders shared by the integration tests: composition playlists,
// asset maps and PCM files.

#![allow(dead_code)]

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const SMPTE_CPL_NS: &str = "http://www.smpte-ra.org/schemas/429-7/2006/CPL";

/// `<MainPicture>` block.
pub fn picture(id: &str, entry_point: u64, duration: u64, frame_rate: &str) -> String {
    format!(
        "<MainPicture>\
           <Id>{id}</Id>\
           <EditRate>24 1</EditRate>\
           <EntryPoint>{entry_point}</EntryPoint>\
           <Duration>{duration}</Duration>\
           <FrameRate>{frame_rate}</FrameRate>\
         </MainPicture>"
    )
}

/// `<MainSound>` block.
pub fn sound(id: &str, entry_point: u64, duration: u64) -> String {
    format!(
        "<MainSound>\
           <Id>{id}</Id>\
           <EditRate>24 1</EditRate>\
           <EntryPoint>{entry_point}</EntryPoint>\
           <Duration>{duration}</Duration>\
         </MainSound>"
    )
}

/// `<Reel>` element around the given asset blocks.
pub fn reel(id: &str, assets: &[String]) -> String {
    format!(
        "<Reel><Id>{id}</Id><AssetList>{}</AssetList></Reel>",
        assets.concat()
    )
}

/// Complete playlist document.
pub fn cpl(title: &str, reels: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <CompositionPlaylist xmlns=\"{SMPTE_CPL_NS}\">\
           <Id>urn:uuid:cpl</Id>\
           <ContentTitleText>{title}</ContentTitleText>\
           <ReelList>{}</ReelList>\
         </CompositionPlaylist>",
        reels.concat()
    )
}

/// Asset map listing `(id, path)` pairs.
pub fn assetmap(entries: &[(&str, &str)]) -> String {
    let assets: String = entries
        .iter()
        .map(|(id, path)| {
            format!(
                "<Asset><Id>{id}</Id><ChunkList><Chunk><Path>{path}</Path></Chunk></ChunkList></Asset>"
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <AssetMap><Id>urn:uuid:map</Id><AssetList>{assets}</AssetList></AssetMap>"
    )
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

/// Sparse file of the given size.
pub fn write_sized(dir: &Path, name: &str, size: u64) -> PathBuf {
    let path = dir.join(name);
    File::create(&path)
        .and_then(|file| file.set_len(size))
        .expect("create sized fixture");
    path
}

pub fn int_spec(channels: u16, bits: u16) -> WavSpec {
    WavSpec {
        channels,
        sample_rate: 48_000,
        bits_per_sample: bits,
        sample_format: SampleFormat::Int,
    }
}

/// Writes `frames` frames, sample of channel `c` at frame `f` given by `sample(f, c)`.
pub fn write_wav(
    path: &Path,
    spec: WavSpec,
    frames: usize,
    sample: impl Fn(usize, usize) -> i32,
) {
    let mut writer = WavWriter::create(path, spec).expect("create wav");
    for frame in 0..frames {
        for channel in 0..usize::from(spec.channels) {
            writer.write_sample(sample(frame, channel)).expect("write sample");
        }
    }
    writer.finalize().expect("finalize wav");
}

/// Reads a WAV back as its spec and planar samples.
pub fn read_wav(path: &Path) -> (WavSpec, Vec<Vec<i32>>) {
    let mut reader = WavReader::open(path).expect("open wav");
    let spec = reader.spec();
    let channels = usize::from(spec.channels);
    let mut planar = vec![Vec::new(); channels];
    for (index, sample) in reader.samples::<i32>().enumerate() {
        planar[index % channels].push(sample.expect("read sample"));
    }
    (spec, planar)
}
