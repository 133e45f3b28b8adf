pub mod hover;
