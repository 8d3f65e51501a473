use crate::application::ports::ModelError;

/// Decoding parameters for beam search.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Maximum generated length, decoder start token excluded.
    pub max_length: usize,
    /// EOS is banned while the generated length is below this.
    pub min_length: usize,
    pub num_beams: usize,
    /// Finished hypotheses are ranked by `score / len^length_penalty`.
    pub length_penalty: f32,
    /// Stop as soon as `num_beams` hypotheses have finished.
    pub early_stopping: bool,
    /// 0 disables the constraint; 2 bans tokens that would repeat a bigram.
    pub no_repeat_ngram_size: usize,
}

#[derive(Clone)]
struct Beam {
    tokens: Vec<u32>,
    score: f32,
}

struct Hypothesis {
    tokens: Vec<u32>,
    normalized_score: f32,
}

/// Beam search over a caller-supplied decoding step.
///
/// `step` receives the decoder token prefix (starting with
/// `decoder_start`) and returns raw logits over the vocabulary for the
/// next position. Returns the best hypothesis' tokens, without the start
/// token or the trailing EOS.
pub fn beam_search<F>(
    mut step: F,
    decoder_start: u32,
    eos_token: u32,
    config: &GenerationConfig,
) -> Result<Vec<u32>, ModelError>
where
    F: FnMut(&[u32]) -> Result<Vec<f32>, ModelError>,
{
    let num_beams = config.num_beams.max(1);
    let mut beams = vec![Beam {
        tokens: vec![decoder_start],
        score: 0.0,
    }];
    let mut finished: Vec<Hypothesis> = Vec::new();

    for generated_len in 0..config.max_length {
        let mut candidates: Vec<Beam> = Vec::with_capacity(beams.len() * num_beams);

        for beam in &beams {
            let logits = step(&beam.tokens)?;
            let mut log_probs = log_softmax(&logits);

            if generated_len < config.min_length {
                if let Some(lp) = log_probs.get_mut(eos_token as usize) {
                    *lp = f32::NEG_INFINITY;
                }
            }

            if config.no_repeat_ngram_size == 2 {
                for banned in banned_bigram_tokens(&beam.tokens) {
                    if let Some(lp) = log_probs.get_mut(banned as usize) {
                        *lp = f32::NEG_INFINITY;
                    }
                }
            }

            for (token, lp) in top_k(&log_probs, num_beams) {
                let mut tokens = beam.tokens.clone();
                tokens.push(token);
                candidates.push(Beam {
                    tokens,
                    score: beam.score + lp,
                });
            }
        }

        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

        let mut next_beams = Vec::with_capacity(num_beams);
        for candidate in candidates {
            if *candidate.tokens.last().unwrap_or(&decoder_start) == eos_token {
                let len = (generated_len + 1) as f32;
                finished.push(Hypothesis {
                    tokens: candidate.tokens,
                    normalized_score: candidate.score / len.powf(config.length_penalty),
                });
            } else {
                next_beams.push(candidate);
            }
            if next_beams.len() == num_beams {
                break;
            }
        }

        if config.early_stopping && finished.len() >= num_beams {
            beams = next_beams;
            break;
        }

        if next_beams.is_empty() {
            beams = next_beams;
            break;
        }

        beams = next_beams;
    }

    // Unfinished beams compete with finished hypotheses at final length.
    for beam in beams {
        let len = (beam.tokens.len() - 1).max(1) as f32;
        finished.push(Hypothesis {
            tokens: beam.tokens,
            normalized_score: beam.score / len.powf(config.length_penalty),
        });
    }

    let best = finished
        .into_iter()
        .max_by(|a, b| a.normalized_score.total_cmp(&b.normalized_score))
        .ok_or_else(|| ModelError::InferenceFailed("beam search produced no hypothesis".into()))?;

    let mut tokens = best.tokens;
    tokens.remove(0);
    if tokens.last() == Some(&eos_token) {
        tokens.pop();
    }

    Ok(tokens)
}

fn log_softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let log_sum: f32 = logits.iter().map(|x| (x - max).exp()).sum::<f32>().ln();
    logits.iter().map(|x| x - max - log_sum).collect()
}

/// Tokens whose selection would repeat a bigram already present in the
/// prefix, given the prefix's last token.
fn banned_bigram_tokens(tokens: &[u32]) -> Vec<u32> {
    let Some(&last) = tokens.last() else {
        return Vec::new();
    };
    tokens
        .windows(2)
        .filter(|w| w[0] == last)
        .map(|w| w[1])
        .collect()
}

fn top_k(log_probs: &[f32], k: usize) -> Vec<(u32, f32)> {
    let mut best: Vec<(u32, f32)> = Vec::with_capacity(k + 1);

    for (idx, &lp) in log_probs.iter().enumerate() {
        if lp == f32::NEG_INFINITY {
            continue;
        }
        if best.len() < k {
            best.push((idx as u32, lp));
            best.sort_by(|a, b| b.1.total_cmp(&a.1));
        } else if lp > best[k - 1].1 {
            best[k - 1] = (idx as u32, lp);
            best.sort_by(|a, b| b.1.total_cmp(&a.1));
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_length: usize) -> GenerationConfig {
        GenerationConfig {
            max_length,
            min_length: 0,
            num_beams: 2,
            length_penalty: 1.0,
            early_stopping: true,
            no_repeat_ngram_size: 0,
        }
    }

    // Vocab: 0 = start, 1 = eos, 2.. = content.
    const START: u32 = 0;
    const EOS: u32 = 1;

    #[test]
    fn greedy_path_is_found() {
        // Always prefer token 2, then eos.
        let step = |prefix: &[u32]| {
            Ok(if prefix.len() < 3 {
                vec![-10.0, -5.0, 0.0, -10.0]
            } else {
                vec![-10.0, 0.0, -5.0, -10.0]
            })
        };

        let tokens = beam_search(step, START, EOS, &config(10)).unwrap();
        assert_eq!(tokens, vec![2, 2]);
    }

    #[test]
    fn min_length_bans_eos() {
        // Eos is always the best token; min_length must hold it off.
        let step = |_: &[u32]| Ok(vec![-10.0, 0.0, -1.0, -10.0]);

        let mut cfg = config(10);
        cfg.min_length = 3;

        let tokens = beam_search(step, START, EOS, &cfg).unwrap();
        assert!(tokens.len() >= 3, "generated {:?}", tokens);
    }

    #[test]
    fn no_repeat_bigram_blocks_cycle() {
        // Without the constraint the best continuation is 2,3,2,3,...
        let step = |prefix: &[u32]| {
            Ok(match prefix.last() {
                Some(2) => vec![-10.0, -8.0, -9.0, 0.0],
                Some(3) => vec![-10.0, -8.0, 0.0, -9.0],
                _ => vec![-10.0, -9.0, 0.0, -1.0],
            })
        };

        let mut cfg = config(8);
        cfg.no_repeat_ngram_size = 2;

        let tokens = beam_search(step, START, EOS, &cfg).unwrap();
        for w in tokens.windows(2) {
            let repeats = tokens.windows(2).filter(|v| v == &w).count();
            assert!(repeats <= 1, "repeated bigram {:?} in {:?}", w, tokens);
        }
    }

    #[test]
    fn max_length_bounds_output() {
        let step = |_: &[u32]| Ok(vec![-10.0, -20.0, 0.0, -1.0]);

        let tokens = beam_search(step, START, EOS, &config(5)).unwrap();
        assert!(tokens.len() <= 5);
    }
}
