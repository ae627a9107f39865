use super::Match;

// Keeps the best matches seen so far, sorted by descending score.
//
// At most `max` matches are kept, and a label is kept only once, with its best score.
//
// `new` panics on a zero `max`; `rank` returns early instead of building one.
pub(crate) struct MatchCollector<'a> {
    max: usize,
    matches: &'a mut Vec<Match>,
}

impl<'a> MatchCollector<'a> {
    pub fn new(matches: &'a mut Vec<Match>, max: usize) -> MatchCollector<'a> {
        assert!(max > 0, "Expected a positive number for the maximum number of matches.");
        assert!(matches.is_empty(), "The pre-existing matches vector must be empty.");
        MatchCollector {
            max: max,
            matches: matches,
        }
    }

    // True if the label is already there with at least as good a score: the new match is skipped.
    // Otherwise an existing, worse entry for the label is removed.
    fn remove_existing_lower(&mut self, mc: &Match) -> bool {
        let ix = match self.matches.iter().position(|x| x.label == mc.label) {
            Some(ix) => ix,
            None => return false,
        };
        if mc.score <= self.matches[ix].score {
            return true;
        }
        self.matches.remove(ix);
        false
    }

    pub fn file_match(&mut self, mc: Match) {
        // Already at limit: don't bother if new match's score is not above the current minimum
        if let Some(lowest) = self.matches.last() {
            if self.matches.len() == self.max && mc.score <= lowest.score {
                return;
            }
        }
        if self.remove_existing_lower(&mc) {
            return;
        }
        // Largest score is always at start of vector
        let ix = self.matches.iter().position(|x| x.score < mc.score);
        match ix {
            Some(ix) => self.matches.insert(ix, mc),
            None => self.matches.push(mc),
        }
        if self.matches.len() > self.max {
            self.matches.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::SimilarityScore;

    fn mc(label: &str, score: f32) -> Match {
        Match {
            label: label.to_string(),
            score: SimilarityScore(score),
        }
    }

    #[test]
    #[should_panic]
    fn test_new_fail1() {
        let mut matches: Vec<Match> = Vec::new();
        let mut _collector = MatchCollector::new(&mut matches, 0);
    }

    #[test]
    #[should_panic]
    fn test_new_fail2() {
        let mut matches: Vec<Match> = vec![mc("circle", 1.0)];
        let mut _collector = MatchCollector::new(&mut matches, 1);
    }

    #[test]
    fn test_filing() {
        let mut matches: Vec<Match> = Vec::new();
        let mut collector = MatchCollector::new(&mut matches, 3);
        collector.file_match(mc("circle", 0.8));
        collector.file_match(mc("square", 0.9));
        collector.file_match(mc("circle", 0.7));
        collector.file_match(mc("star", 0.7));
        collector.file_match(mc("arrow", 1.0));
        assert_eq!(matches, [mc("arrow", 1.0), mc("square", 0.9), mc("circle", 0.8)]);
    }

    #[test]
    fn test_better_score_replaces_label() {
        let mut matches: Vec<Match> = Vec::new();
        let mut collector = MatchCollector::new(&mut matches, 2);
        collector.file_match(mc("circle", 0.4));
        collector.file_match(mc("square", 0.6));
        collector.file_match(mc("circle", 0.9));
        assert_eq!(matches, [mc("circle", 0.9), mc("square", 0.6)]);
    }
}
