pub mod contour_edge_blender;
