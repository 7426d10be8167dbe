//! Typing challenges and the texts they are typed from
//!
//! Most challenges carry a fixed passage. Challenge-tier entries are different: every time one is
//! selected, a [`TextProvider`] draws a fresh passage for it.

use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Challenge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Challenge,
}

/// A passage to practice on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// The passage. Challenge-tier entries fall back to it when no passage fits the pool filter
    pub text: &'static str,
    pub difficulty: Difficulty,
    pub estimated_time: &'static str,
    pub level: Level,
}

impl Challenge {
    /// Returns true if the challenge draws a new passage every time it is selected
    pub fn is_randomized(&self) -> bool {
        self.level == Level::Challenge
    }
}

const CHALLENGES: &[Challenge] = &[
    Challenge {
        id: "beginner-1",
        title: "A Study in Scarlet",
        description: "Introduction to Sherlock Holmes",
        text: "In the year 1878 I took my degree of Doctor of Medicine of the University of London, and proceeded to Netley to go through the course prescribed for surgeons in the army. Having completed my studies there, I was duly attached to the Fifth Northumberland Fusiliers as Assistant Surgeon.",
        difficulty: Difficulty::Easy,
        estimated_time: "30 sec",
        level: Level::Beginner,
    },
    Challenge {
        id: "beginner-2",
        title: "The Red-Headed League",
        description: "The mysterious job offer",
        text: "I had called upon my friend, Mr. Sherlock Holmes, one day in the autumn of last year and found him in deep conversation with a very stout, florid-faced, elderly gentleman with fiery red hair.",
        difficulty: Difficulty::Easy,
        estimated_time: "20 sec",
        level: Level::Beginner,
    },
    Challenge {
        id: "beginner-3",
        title: "The Blue Carbuncle",
        description: "A Christmas mystery",
        text: "I had called upon my friend Sherlock Holmes upon the second morning after Christmas, with the intention of wishing him the compliments of the season.",
        difficulty: Difficulty::Easy,
        estimated_time: "15 sec",
        level: Level::Beginner,
    },
    Challenge {
        id: "beginner-4",
        title: "A Scandal in Bohemia",
        description: "The woman who outsmarted Holmes",
        text: "To Sherlock Holmes she is always the woman. I have seldom heard him mention her under any other name. In his eyes she eclipses and predominates the whole of her sex.",
        difficulty: Difficulty::Easy,
        estimated_time: "20 sec",
        level: Level::Beginner,
    },
    Challenge {
        id: "beginner-5",
        title: "The Five Orange Pips",
        description: "A deadly warning",
        text: "When I glance over my notes and records of the Sherlock Holmes cases between the years '82 and '90, I am faced by so many which present strange and interesting features that it is no easy matter to know which to choose and which to leave.",
        difficulty: Difficulty::Easy,
        estimated_time: "30 sec",
        level: Level::Beginner,
    },
    Challenge {
        id: "intermediate-1",
        title: "The Science of Deduction",
        description: "Holmes explains his methods",
        text: "From a drop of water a logician could infer the possibility of an Atlantic or a Niagara without having seen or heard of one or the other. So all life is a great chain, the nature of which is known whenever we are shown a single link of it.",
        difficulty: Difficulty::Medium,
        estimated_time: "1 min",
        level: Level::Intermediate,
    },
    Challenge {
        id: "intermediate-2",
        title: "The Speckled Band",
        description: "A locked room mystery",
        text: "The adventure of the Speckled Band represents a case where Sherlock Holmes was engaged in his professional capacity. Miss Helen Stoner consulted him in regard to some very unusual happenings at Stoke Moran, the residence of her stepfather, Dr. Grimesby Roylott, the last survivor of one of the oldest Saxon families in England.",
        difficulty: Difficulty::Medium,
        estimated_time: "1 min",
        level: Level::Intermediate,
    },
    Challenge {
        id: "intermediate-3",
        title: "Silver Blaze",
        description: "The case of the missing racehorse",
        text: "I am afraid, Watson, that I shall have to go. What do you mean, Holmes? I have just had an answer to my American telegram. No; we have got something really practical. My dear fellow, I stand upon the point of completing one of the most remarkable cases of my career. The problem of the missing race-horse.",
        difficulty: Difficulty::Medium,
        estimated_time: "45 sec",
        level: Level::Intermediate,
    },
    Challenge {
        id: "intermediate-4",
        title: "The Dancing Men",
        description: "Holmes deciphers a code",
        text: "Holmes had been seated for some hours in silence with his long, thin back curved over a chemical vessel in which he was brewing a particularly malodorous product. His head was sunk upon his breast, and he looked from my point of view like a strange, lank bird, with dull gray plumage and a black top-knot.",
        difficulty: Difficulty::Medium,
        estimated_time: "50 sec",
        level: Level::Intermediate,
    },
    Challenge {
        id: "intermediate-5",
        title: "The Naval Treaty",
        description: "A missing document of national importance",
        text: "The July which immediately succeeded my marriage was made memorable by three cases of interest, in which I had the privilege of being associated with Sherlock Holmes and of studying his methods. I find them recorded in my notes under the headings of 'The Adventure of the Second Stain,' 'The Adventure of the Naval Treaty,' and 'The Adventure of the Tired Captain.'",
        difficulty: Difficulty::Medium,
        estimated_time: "1 min",
        level: Level::Intermediate,
    },
    Challenge {
        id: "advanced-1",
        title: "The Hound of the Baskervilles",
        description: "The famous supernatural case",
        text: "Mr. Sherlock Holmes, who was usually very late in the mornings, save upon those not infrequent occasions when he was up all night, was seated at the breakfast table. I stood upon the hearth-rug and picked up the stick which our visitor had left behind him the night before. It was a fine, thick piece of wood, bulbous-headed, of the sort which is known as a 'Penang lawyer.'",
        difficulty: Difficulty::Hard,
        estimated_time: "2 min",
        level: Level::Advanced,
    },
    Challenge {
        id: "advanced-2",
        title: "The Final Problem",
        description: "Holmes faces his nemesis Professor Moriarty",
        text: "It is with a heavy heart that I take up my pen to write these the last words in which I shall ever record the singular gifts by which my friend Mr. Sherlock Holmes was distinguished. In an incoherent and, as I deeply feel, an entirely inadequate fashion, I have endeavored to give some account of my strange experiences in his company from the chance which first brought us together at the period of the 'Study in Scarlet,' up to the time of his interference in the matter of the 'Naval Treaty.'",
        difficulty: Difficulty::Hard,
        estimated_time: "3 min",
        level: Level::Advanced,
    },
    Challenge {
        id: "advanced-3",
        title: "The Empty House",
        description: "Holmes's dramatic return",
        text: "It was in the spring of the year 1894 that all London was interested, and the fashionable world dismayed, by the murder of the Honourable Ronald Adair under most unusual and inexplicable circumstances. The public has already learned those particulars of the crime which came out in the police investigation, but a good deal was suppressed upon that occasion, since the case for the prosecution was so overwhelmingly strong that it was not necessary to bring forward all the facts.",
        difficulty: Difficulty::Hard,
        estimated_time: "2 min 30 sec",
        level: Level::Advanced,
    },
    Challenge {
        id: "advanced-4",
        title: "The Valley of Fear",
        description: "Holmes investigates a coded message",
        text: "I am inclined to think—said I. I should do so, Sherlock Holmes remarked impatiently. I believe that I am one of the most long-suffering of mortals; but I'll admit that I was annoyed at the sardonic interruption. Being a natural busybody, he went on, is one of the most valuable qualities a man can possess in this world. So it is that I find myself telling you a story long before I should even properly know whether you desire to hear it.",
        difficulty: Difficulty::Hard,
        estimated_time: "2 min",
        level: Level::Advanced,
    },
    Challenge {
        id: "advanced-5",
        title: "His Last Bow",
        description: "Holmes's wartime service",
        text: "It was nine o'clock at night upon the second of August—the most terrible August in the history of the world. One might have thought already that God's curse hung heavy over a degenerate world, for there was an awesome hush and a feeling of vague expectancy in the sultry and stagnant air. The sun had long set, but one blood-red gash like an open wound lay low in the distant west. Above, the stars were shining brightly, and below, the lights of the shipping glimmered in the bay.",
        difficulty: Difficulty::Hard,
        estimated_time: "3 min",
        level: Level::Advanced,
    },
    Challenge {
        id: "challenge-1",
        title: "The Casebook",
        description: "A different passage every time",
        text: "You see, but you do not observe. The distinction is clear. For example, you have frequently seen the steps which lead up from the hall to this room. How often? Well, some hundreds of times. Then how many are there? How many? I don't know. Quite so! You have not observed. And yet you have seen. That is just my point. Now, I know that there are seventeen steps, because I have both seen and observed.",
        difficulty: Difficulty::Challenge,
        estimated_time: "varies",
        level: Level::Challenge,
    },
];

/// Passages that only appear in the challenge tier
const EXTRA_PASSAGES: &[&str] = &[
    "My mind rebels at stagnation. Give me problems, give me work, give me the most abstruse cryptogram or the most intricate analysis, and I am in my own proper atmosphere. I can dispense then with artificial stimulants. But I abhor the dull routine of existence. I crave for mental exaltation. That is why I have chosen my own particular profession, or rather created it, for I am the only one in the world.",
    "I consider that a man's brain originally is like a little empty attic, and you have to stock it with such furniture as you choose. A fool takes in all the lumber of every sort that he comes across, so that the knowledge which might be useful to him gets crowded out, or at best is jumbled up with a lot of other things so that he has a difficulty in laying his hands upon it.",
    "It is a capital mistake to theorize before one has data. Insensibly one begins to twist facts to suit theories, instead of theories to suit facts.",
];

/// Every challenge known to the application
#[derive(Debug, Clone)]
pub struct Catalog {
    challenges: Vec<Challenge>,
}

impl Catalog {
    /// The built-in challenges
    pub fn builtin() -> Self {
        Self {
            challenges: CHALLENGES.to_vec(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Challenge> {
        self.challenges.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Challenge> {
        self.iter().find(|challenge| challenge.id == id)
    }

    pub fn by_level(&self, level: Level) -> impl Iterator<Item = &Challenge> {
        self.iter()
            .filter(move |challenge| challenge.level == level)
    }

    /// Levels in order of difficulty
    pub fn levels(&self) -> impl Iterator<Item = Level> {
        Level::iter()
    }

    /// Every passage a challenge-tier entry may draw from
    pub fn passages(&self) -> impl Iterator<Item = &'static str> {
        self.iter()
            .map(|challenge| challenge.text)
            .chain(EXTRA_PASSAGES.iter().copied())
    }
}

/// Length bounds, in characters, for passages drawn by the challenge tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolFilter {
    pub min_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
}

impl Default for PoolFilter {
    fn default() -> Self {
        Self {
            min_len: 250,
            max_len: Some(600),
        }
    }
}

impl PoolFilter {
    pub fn accepts(&self, text: &str) -> bool {
        let length = text.chars().count();
        length >= self.min_len && self.max_len.is_none_or(|max_len| length <= max_len)
    }
}

/// Supplies the text to type for a challenge
pub trait TextProvider {
    fn text_for(&mut self, challenge: &Challenge) -> String;
}

/// Draws challenge-tier passages uniformly at random from a length-filtered pool
///
/// Fixed challenges always get their own passage. When no passage in the pool passes the
/// filter, a challenge-tier entry falls back to its own passage.
#[derive(Debug)]
pub struct PassagePool<R: Rng = ThreadRng> {
    passages: Vec<&'static str>,
    rng: R,
}

impl PassagePool<ThreadRng> {
    pub fn new(catalog: &Catalog, filter: PoolFilter) -> Self {
        Self::with_rng(catalog, filter, rand::thread_rng())
    }
}

impl<R: Rng> PassagePool<R> {
    pub fn with_rng(catalog: &Catalog, filter: PoolFilter, rng: R) -> Self {
        let mut passages: Vec<&'static str> = catalog
            .passages()
            .filter(|passage| filter.accepts(passage))
            .collect();
        passages.dedup();

        log::debug!("Challenge pool holds {} passages", passages.len());

        Self { passages, rng }
    }

    /// The passages that passed the filter
    #[cfg(test)]
    pub fn passages(&self) -> &[&'static str] {
        &self.passages
    }
}

impl<R: Rng> TextProvider for PassagePool<R> {
    fn text_for(&mut self, challenge: &Challenge) -> String {
        if !challenge.is_randomized() {
            return challenge.text.to_string();
        }

        match self.passages.choose(&mut self.rng) {
            Some(passage) => passage.to_string(),
            None => {
                log::warn!(
                    "No passage fits the challenge pool filter, using the text of '{}'",
                    challenge.id
                );
                challenge.text.to_string()
            }
        }
    }
}
