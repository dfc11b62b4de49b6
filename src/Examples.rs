/// walkthroughs on the embedded sample database
pub mod thermoinp_examples;
