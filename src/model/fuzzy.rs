use super::{ModelError, Suggest};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use strsim::levenshtein;
use tempfile::NamedTempFile;

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainOptions {
    /// Maximum edit distance a correction may be from the input.
    pub depth: usize,
    /// Minimum number of occurrences in the word list before a word is
    /// offered as a correction.
    pub threshold: usize,
    /// Drop words containing an apostrophe before training.
    pub skip_apostrophes: bool,
    /// Only this many leading characters of a word are expanded into delete
    /// variants. Always raised above `depth`.
    pub prefix_length: usize,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            depth: 3,
            threshold: 1,
            skip_apostrophes: false,
            prefix_length: 7,
        }
    }
}

/// Symmetric-delete spelling model.
///
/// Every word is indexed under all variants of its first `prefix_length`
/// characters with up to `depth` characters deleted. A lookup deletes
/// characters from the input prefix the same way and only compares against
/// words sharing a variant, so the cost depends on neither the dictionary
/// size nor the length of the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzyModel {
    version: u32,
    depth: usize,
    threshold: usize,
    #[serde(default = "default_prefix_length")]
    prefix_length: usize,
    counts: HashMap<String, usize>,
    #[serde(skip)]
    deletes: HashMap<String, Vec<String>>,
    #[serde(skip)]
    longest_word: usize,
}

fn default_prefix_length() -> usize {
    TrainOptions::default().prefix_length
}

impl FuzzyModel {
    /// Build a model from a list of words. Each occurrence of a word counts
    /// towards its frequency; blank entries are ignored.
    pub fn train<I, S>(words: I, options: TrainOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() || (options.skip_apostrophes && word.contains('\'')) {
                continue;
            }
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }

        let mut model = Self {
            version: FORMAT_VERSION,
            depth: options.depth,
            threshold: options.threshold.max(1),
            prefix_length: options.prefix_length.max(options.depth + 1),
            counts,
            deletes: HashMap::new(),
            longest_word: 0,
        };
        model.build_index();
        model
    }

    /// Train from a newline-delimited word list on disk.
    pub fn train_from_file(dictionary: &Path, options: TrainOptions) -> Result<Self, ModelError> {
        let content = fs::read_to_string(dictionary).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ModelError::NotFound(dictionary.to_path_buf())
            } else {
                ModelError::Io {
                    path: dictionary.to_path_buf(),
                    source,
                }
            }
        })?;

        Ok(Self::train(content.lines(), options))
    }

    /// Load a model written by [`FuzzyModel::save`].
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let file = File::open(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ModelError::NotFound(path.to_path_buf())
            } else {
                ModelError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let reader = GzDecoder::new(BufReader::new(file));
        let mut model: Self =
            serde_json::from_reader(reader).map_err(|source| ModelError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;

        if model.version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                path: path.to_path_buf(),
                found: model.version,
                expected: FORMAT_VERSION,
            });
        }

        model.prefix_length = model.prefix_length.max(model.depth + 1);
        model.build_index();
        Ok(model)
    }

    /// Persist the model as gzip-compressed JSON, replacing `path` atomically.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let io_err = |source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        };

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(io_err)?;

        let temp_file = NamedTempFile::new_in(parent).map_err(io_err)?;
        {
            let mut encoder =
                GzEncoder::new(BufWriter::new(temp_file.as_file()), Compression::default());
            serde_json::to_writer(&mut encoder, self).map_err(|source| ModelError::Io {
                path: path.to_path_buf(),
                source: source.into(),
            })?;
            encoder.finish().map_err(io_err)?.flush().map_err(io_err)?;
        }

        temp_file.persist(path).map_err(|e| io_err(e.error))?;
        Ok(())
    }

    /// Number of distinct words in the model.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// How many times `word` appeared in the training list.
    pub fn frequency(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn prefix_length(&self) -> usize {
        self.prefix_length
    }

    fn build_index(&mut self) {
        let mut deletes: HashMap<String, Vec<String>> = HashMap::new();
        let mut longest_word = 0;
        for (word, &count) in &self.counts {
            if count < self.threshold {
                continue;
            }
            let lower = word.to_lowercase();
            longest_word = longest_word.max(lower.chars().count());
            for variant in generate_deletes(&prefix(&lower, self.prefix_length), self.depth) {
                deletes.entry(variant).or_default().push(word.clone());
            }
        }
        self.deletes = deletes;
        self.longest_word = longest_word;
    }
}

impl Suggest for FuzzyModel {
    fn suggest(&self, word: &str) -> Option<String> {
        if word.is_empty() {
            return None;
        }
        if self.frequency(word) >= self.threshold {
            return Some(word.to_string());
        }

        let input = word.to_lowercase();
        let input_len = input.chars().count();
        if input_len > self.longest_word + self.depth {
            return None;
        }

        let mut seen = HashSet::new();
        let mut best: Option<(usize, usize, &str)> = None;

        for variant in generate_deletes(&prefix(&input, self.prefix_length), self.depth) {
            let Some(originals) = self.deletes.get(&variant) else {
                continue;
            };
            for original in originals {
                if !seen.insert(original.as_str()) {
                    continue;
                }
                let candidate = original.to_lowercase();
                if candidate.chars().count().abs_diff(input_len) > self.depth {
                    continue;
                }
                let distance = levenshtein(&input, &candidate);
                if distance > self.depth {
                    continue;
                }
                let count = self.frequency(original);
                let better = match best {
                    None => true,
                    Some((d, c, w)) => (distance, std::cmp::Reverse(count), original.as_str())
                        < (d, std::cmp::Reverse(c), w),
                };
                if better {
                    best = Some((distance, count, original.as_str()));
                }
            }
        }

        best.map(|(_, _, w)| w.to_string())
    }
}

/// All variants of `word` with up to `depth` characters removed, including
/// `word` itself.
fn generate_deletes(word: &str, depth: usize) -> HashSet<String> {
    let mut variants = HashSet::new();
    variants.insert(word.to_string());

    let mut frontier = vec![word.to_string()];
    for _ in 0..depth {
        let mut next = Vec::new();
        for current in &frontier {
            let chars: Vec<char> = current.chars().collect();
            for i in 0..chars.len() {
                let variant: String = chars
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, c)| c)
                    .collect();
                if variants.insert(variant.clone()) {
                    next.push(variant);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    variants
}

/// The first `len` characters of `word`.
fn prefix(word: &str, len: usize) -> String {
    word.chars().take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn words() -> Vec<&'static str> {
        vec!["the", "the", "cat", "sat", "hello", "world", "help", "car"]
    }

    #[test]
    fn test_prefix() {
        assert_eq!(prefix("internationalization", 7), "interna");
        assert_eq!(prefix("cat", 7), "cat");
        assert_eq!(prefix("ñandú", 2), "ña");
    }

    #[test]
    fn test_generate_deletes() {
        let variants = generate_deletes("cat", 1);
        assert_eq!(variants.len(), 4);
        assert!(variants.contains("cat"));
        assert!(variants.contains("at"));
        assert!(variants.contains("ct"));
        assert!(variants.contains("ca"));

        let variants = generate_deletes("ab", 3);
        assert!(variants.contains(""));
    }

    #[test]
    fn test_known_word_suggests_itself() {
        let model = FuzzyModel::train(words(), TrainOptions::default());
        assert_eq!(model.suggest("cat").as_deref(), Some("cat"));
        assert_eq!(model.frequency("the"), 2);
        assert_eq!(model.len(), 7);
    }

    #[test]
    fn test_suggests_closest_word() {
        let model = FuzzyModel::train(words(), TrainOptions::default());
        assert_eq!(model.suggest("helo").as_deref(), Some("hello"));
        assert_eq!(model.suggest("wrold").as_deref(), Some("world"));
        assert_eq!(model.suggest("Teh").as_deref(), Some("the"));
    }

    #[test]
    fn test_case_variant_maps_to_dictionary_form() {
        let model = FuzzyModel::train(words(), TrainOptions::default());
        assert_eq!(model.suggest("Cat").as_deref(), Some("cat"));
    }

    #[test]
    fn test_no_candidate_within_depth() {
        let options = TrainOptions {
            depth: 1,
            ..Default::default()
        };
        let model = FuzzyModel::train(words(), options);
        assert_eq!(model.suggest("xylophone"), None);
        assert_eq!(model.suggest(""), None);
    }

    #[test]
    fn test_threshold_hides_rare_words() {
        let options = TrainOptions {
            threshold: 2,
            ..Default::default()
        };
        let model = FuzzyModel::train(words(), options);
        // "cat" appears once, so it is never offered; "the" appears twice.
        assert_eq!(model.suggest("cat").as_deref(), Some("the"));
        assert_eq!(model.suggest("teh").as_deref(), Some("the"));
    }

    #[test]
    fn test_skip_apostrophes() {
        let options = TrainOptions {
            skip_apostrophes: true,
            ..Default::default()
        };
        let model = FuzzyModel::train(vec!["don't", "dont", "  "], options);
        assert_eq!(model.len(), 1);
        assert_eq!(model.frequency("don't"), 0);
    }

    #[test]
    fn test_trims_carriage_returns() {
        let model = FuzzyModel::train("alpha\r\nbeta\r\n".split('\n'), TrainOptions::default());
        assert_eq!(model.suggest("alpha").as_deref(), Some("alpha"));
        assert_eq!(model.suggest("bta").as_deref(), Some("beta"));
    }

    #[test]
    fn test_long_words_beyond_prefix() {
        let model = FuzzyModel::train(
            ["accommodation", "internationalization", "the"],
            TrainOptions::default(),
        );
        assert_eq!(model.prefix_length(), 7);
        assert_eq!(
            model.suggest("accomodation").as_deref(),
            Some("accommodation")
        );
        assert_eq!(
            model.suggest("internationalizaton").as_deref(),
            Some("internationalization")
        );
    }

    #[test]
    fn test_prefix_length_stays_above_depth() {
        let options = TrainOptions {
            depth: 3,
            prefix_length: 2,
            ..Default::default()
        };
        let model = FuzzyModel::train(["hello"], options);
        assert_eq!(model.prefix_length(), 4);
        assert_eq!(model.suggest("hallo").as_deref(), Some("hello"));
    }

    #[test]
    fn test_very_long_token_returns_quickly() {
        let model = FuzzyModel::train(["the", "cat"], TrainOptions::default());

        let blob = "the".repeat(400);
        let url = format!("https://example.com/{}", "a1b2c3".repeat(200));
        let near_limit = "x".repeat(6);

        let start = std::time::Instant::now();
        assert_eq!(model.suggest(&blob), None);
        assert_eq!(model.suggest(&url), None);
        assert_eq!(model.suggest(&near_limit), None);
        assert!(start.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_long_token_within_prefix_budget() {
        let long_word = "pneumonoultramicroscopicsilicovolcanoconiosis";
        let model = FuzzyModel::train([long_word, "cat"], TrainOptions::default());

        let typo = long_word.replacen("micro", "mirco", 1);
        let start = std::time::Instant::now();
        assert_eq!(model.suggest(&typo).as_deref(), Some(long_word));
        assert_eq!(model.suggest(&"z".repeat(1_500)), None);
        assert!(start.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.gz");

        let model = FuzzyModel::train(words(), TrainOptions::default());
        model.save(&path).unwrap();

        let loaded = FuzzyModel::load(&path).unwrap();
        assert_eq!(loaded.len(), model.len());
        assert_eq!(loaded.depth(), 3);
        assert_eq!(loaded.prefix_length(), 7);
        assert_eq!(loaded.suggest("helo").as_deref(), Some("hello"));
    }

    #[test]
    fn test_train_from_file() {
        let dir = tempdir().unwrap();
        let dict = dir.path().join("words.txt");
        fs::write(&dict, "apple\nbanana\ncherry\n").unwrap();

        let model = FuzzyModel::train_from_file(&dict, TrainOptions::default()).unwrap();
        assert_eq!(model.len(), 3);
        assert_eq!(model.suggest("banan").as_deref(), Some("banana"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = FuzzyModel::load(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ModelError::NotFound(_)));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad");
        fs::write(&path, "this is not a model").unwrap();

        let err = FuzzyModel::load(&path).unwrap_err();
        assert!(matches!(err, ModelError::Corrupt { .. }));
    }
}
