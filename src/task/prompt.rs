/// Instruction text paired with every task, parameterised by the circle count.
pub fn prompt_for(num_circles: usize) -> String {
    format!(
        "The scene shows {num_circles} circles of different sizes and colors arranged randomly.\n\
         Keep every circle unchanged in size and color. Only rearrange their positions.\n\
         Align all circles on a single horizontal line and sort them from left to right by \
         circumference, from largest to smallest."
    )
}
