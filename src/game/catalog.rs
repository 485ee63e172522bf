//! Built-in game definitions
//!
//! Each game is a thin stimulus provider over a fixed data set; the
//! shared engine does everything else. Asset names refer to the sound
//! and image files a collaborator UI would present.

use super::{Answer, Stimulus, StimulusProvider};
use crate::grade::Tier;
use rand::seq::SliceRandom;
use rand::Rng;

/// Animal sound files and the animal that makes them
const ANIMALS: [(&str, &str); 7] = [
    ("cat.wav", "cat"),
    ("cow.wav", "cow"),
    ("dog.wav", "dog"),
    ("elephant.wav", "elephant"),
    ("horse.wav", "horse"),
    ("sheep.wav", "sheep"),
    ("tiger.wav", "tiger"),
];

const COLORS: [&str; 10] = [
    "red", "green", "blue", "yellow", "purple", "orange", "pink", "brown", "black", "white",
];

/// Shapes the color game draws (the answer is the color, not the shape)
const COLOR_GAME_SHAPES: [&str; 5] = ["circle", "square", "triangle", "star", "heart"];

const SHAPES: [&str; 10] = [
    "circle",
    "square",
    "triangle",
    "star",
    "heart",
    "rectangle",
    "pentagon",
    "hexagon",
    "octagon",
    "diamond",
];

/// Object images and their names, A through Z
const OBJECTS: [(&str, &str); 28] = [
    ("apple.png", "apple"),
    ("ball.png", "ball"),
    ("cat.png", "cat"),
    ("cow.png", "cow"),
    ("dog.png", "dog"),
    ("elephant.png", "elephant"),
    ("fan.png", "fan"),
    ("grass.png", "grass"),
    ("horse.jpg", "horse"),
    ("igloo.jpg", "igloo"),
    ("jar.png", "jar"),
    ("kangaroo.jpg", "kangaroo"),
    ("lemon.jpg", "lemon"),
    ("lion.png", "lion"),
    ("mango.jpg", "mango"),
    ("nest.jpg", "nest"),
    ("owl.jpg", "owl"),
    ("panda.jpg", "panda"),
    ("quill.png", "quill"),
    ("rainbow.jpg", "rainbow"),
    ("stars.jpg", "stars"),
    ("torch.png", "torch"),
    ("umbrella.jpg", "umbrella"),
    ("volcano.jpg", "volcano"),
    ("waterfall.jpg", "waterfall"),
    ("xylophone.png", "xylophone"),
    ("yak.jpg", "yak"),
    ("zebra.jpg", "zebra"),
];

/// Items the counting game lays out in a grid
const COUNTABLES: [&str; 5] = ["apple", "ball", "star", "duck", "balloon"];

/// Identify the animal from its sound
struct AnimalSounds;

impl StimulusProvider for AnimalSounds {
    fn name(&self) -> &'static str {
        "animals"
    }

    fn title(&self) -> &'static str {
        "Animal Sound Game"
    }

    fn next(&mut self, _tier: Tier) -> Stimulus {
        let (sound, animal) = ANIMALS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(ANIMALS[0]);
        Stimulus {
            prompt: "Which animal made that sound?".to_string(),
            asset: Some(sound.to_string()),
            answer: Answer::Word(animal.to_string()),
        }
    }
}

/// Name the color of a drawn shape
struct ColorShapes;

impl StimulusProvider for ColorShapes {
    fn name(&self) -> &'static str {
        "colors"
    }

    fn title(&self) -> &'static str {
        "Color Game"
    }

    fn next(&mut self, _tier: Tier) -> Stimulus {
        let mut rng = rand::thread_rng();
        let color = COLORS.choose(&mut rng).copied().unwrap_or(COLORS[0]);
        let shape = COLOR_GAME_SHAPES
            .choose(&mut rng)
            .copied()
            .unwrap_or(COLOR_GAME_SHAPES[0]);
        Stimulus {
            prompt: "What color is this shape?".to_string(),
            asset: Some(format!("{} {}", color, shape)),
            answer: Answer::Word(color.to_string()),
        }
    }
}

/// Name a drawn shape
struct Shapes;

impl StimulusProvider for Shapes {
    fn name(&self) -> &'static str {
        "shapes"
    }

    fn title(&self) -> &'static str {
        "Shape Game"
    }

    fn next(&mut self, _tier: Tier) -> Stimulus {
        let shape = SHAPES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(SHAPES[0]);
        Stimulus {
            prompt: "What shape is this?".to_string(),
            asset: Some(shape.to_string()),
            answer: Answer::Word(shape.to_string()),
        }
    }
}

/// Name the pictured object
struct NameObjects;

impl StimulusProvider for NameObjects {
    fn name(&self) -> &'static str {
        "objects"
    }

    fn title(&self) -> &'static str {
        "Name the Object Game"
    }

    fn next(&mut self, _tier: Tier) -> Stimulus {
        let (image, object) = OBJECTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(OBJECTS[0]);
        Stimulus {
            prompt: "What is this?".to_string(),
            asset: Some(image.to_string()),
            answer: Answer::Word(object.to_string()),
        }
    }
}

/// Count items in a grid; the range grows with the tier
struct Counting;

impl Counting {
    /// 1-5 while learning, 1-10 at the middle tier, 1-15 for pros
    fn max_count(tier: Tier) -> u32 {
        match tier {
            Tier::VoiceHints => 5,
            Tier::TextHints => 10,
            Tier::Pro => 15,
        }
    }
}

impl StimulusProvider for Counting {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn title(&self) -> &'static str {
        "Count the Numbers Game"
    }

    fn next(&mut self, tier: Tier) -> Stimulus {
        let mut rng = rand::thread_rng();
        let count = rng.gen_range(1..=Self::max_count(tier));
        let item = COUNTABLES.choose(&mut rng).copied().unwrap_or(COUNTABLES[0]);
        Stimulus {
            prompt: format!("How many {}s do you see?", item),
            asset: Some(format!("{} x{}", item, count)),
            answer: Answer::Count(count),
        }
    }
}

/// All built-in games as (name, title) pairs
pub fn game_names() -> Vec<(&'static str, &'static str)> {
    vec![
        ("animals", "Animal Sound Game"),
        ("colors", "Color Game"),
        ("shapes", "Shape Game"),
        ("objects", "Name the Object Game"),
        ("counting", "Count the Numbers Game"),
    ]
}

/// Look up a game by its command-line name
pub fn create_game(name: &str) -> Option<Box<dyn StimulusProvider>> {
    match name {
        "animals" => Some(Box::new(AnimalSounds)),
        "colors" => Some(Box::new(ColorShapes)),
        "shapes" => Some(Box::new(Shapes)),
        "objects" => Some(Box::new(NameObjects)),
        "counting" => Some(Box::new(Counting)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_game_resolves() {
        for (name, title) in game_names() {
            let game = create_game(name).expect("listed game must resolve");
            assert_eq!(game.name(), name);
            assert_eq!(game.title(), title);
        }
    }

    #[test]
    fn test_unknown_game_is_none() {
        assert!(create_game("chess").is_none());
    }

    #[test]
    fn test_word_answers_are_lowercase() {
        // The grader lowercases transcripts; expected words must
        // already be lowercase for containment to work.
        for (_, animal) in ANIMALS {
            assert_eq!(animal, animal.to_lowercase());
        }
        for (_, object) in OBJECTS {
            assert_eq!(object, object.to_lowercase());
        }
        for color in COLORS {
            assert_eq!(color, color.to_lowercase());
        }
    }

    #[test]
    fn test_counting_range_scales_with_tier() {
        let mut game = Counting;
        for _ in 0..50 {
            let s = game.next(Tier::VoiceHints);
            match s.answer {
                Answer::Count(n) => assert!((1..=5).contains(&n)),
                _ => panic!("counting game must expect a count"),
            }
        }
        for _ in 0..50 {
            let s = game.next(Tier::Pro);
            match s.answer {
                Answer::Count(n) => assert!((1..=15).contains(&n)),
                _ => panic!("counting game must expect a count"),
            }
        }
    }

    #[test]
    fn test_stimuli_carry_assets() {
        let mut game = AnimalSounds;
        let s = game.next(Tier::VoiceHints);
        assert!(s.asset.unwrap().ends_with(".wav"));

        let mut game = NameObjects;
        let s = game.next(Tier::VoiceHints);
        let asset = s.asset.unwrap();
        assert!(asset.ends_with(".png") || asset.ends_with(".jpg"));
    }
}
